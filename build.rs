//! Retrieves information about the version of the crate from Git and the build
//! environment. It can then be accessed at runtime through
//! `mailbox::version()`.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
