use rand::Rng;
use uuid::Uuid;

use crate::PlayerId;

/// Generate a deterministic v4-format UUID from a seeded RNG.
pub fn generate_uuid(rng: &mut impl Rng) -> Uuid {
    let bytes: [u8; 16] = rng.gen();
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

pub fn generate_player_id(rng: &mut impl Rng) -> PlayerId {
    PlayerId(format!("player_{}", generate_uuid(rng)))
}
