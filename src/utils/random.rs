use rand::{Rng, distr::Alphanumeric};

pub const GENERATED_PASSWORD_LENGTH: usize = 20;

/// Random alphanumeric string, e.g. `"A1b2C3d4"` for a length of 8.
pub fn generate_random_string(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect::<String>()
}

/// Password for the bootstrap master account when none is configured.
pub fn generate_password() -> String {
    generate_random_string(GENERATED_PASSWORD_LENGTH)
}
