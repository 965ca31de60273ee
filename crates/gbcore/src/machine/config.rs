use typed_builder::TypedBuilder;

/// Start-up options for [`GameBoy`](super::GameBoy).
#[derive(Clone, Debug, TypedBuilder)]
pub struct MachineConfig {
    /// Start from the state the DMG boot ROM leaves behind (CPU registers
    /// and I/O defaults) instead of an all-zero reset.
    #[builder(default = true)]
    pub skip_boot: bool,
    /// Where `GameBoy::load` places a program image.
    #[builder(default = 0x0100)]
    pub load_address: u16,
    /// Initial PC. Defaults to 0x0100 with `skip_boot`, otherwise the
    /// reset vector.
    #[builder(default, setter(strip_option))]
    pub entry_point: Option<u16>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
