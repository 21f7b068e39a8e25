/// Image-to-VEX derivation core
///
/// `domain` holds the value objects, `services` the pure pipeline stages.
/// Neither touches the network or the file system.
pub mod domain;
pub mod services;
