use soroban_sdk::contracterror;

/// Error codes returned by the noise monitor.
///
/// # Code classes
/// | Codes   | Class                                                      |
/// |---------|------------------------------------------------------------|
/// | 1 – 2   | Lifecycle                                                  |
/// | 3       | Authorization (caller lacks role or record history)        |
/// | 4 – 5   | Validation (out-of-domain plaintext arguments)             |
/// | 6, 8, 9 | Authorization (unknown location, invalid manager or owner) |
/// | 7       | Empty state: location has no contributions yet             |
///
/// Failures inside the FHE executor are not mapped here: they abort the
/// whole transaction.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum NoiseError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    IndexOutOfBounds = 5,
    LocationNotFound = 6,
    NoData = 7,
    InvalidManagerAddress = 8,
    InvalidNewOwner = 9,
}
