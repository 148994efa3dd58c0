fn main() {
    // Propagate the ESP-IDF link and cfg environment to the firmware crate.
    // Host builds (`--no-default-features`) have nothing to emit.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
