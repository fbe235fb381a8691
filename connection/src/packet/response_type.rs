/// First-byte markers of generic response packets.
///
/// see https://dev.mysql.com/doc/internals/en/generic-response-packets.html
pub struct ResponseType;

impl ResponseType {
    pub const OK: u8 = 0x00;

    /// Also the first byte of length-encoded integers in the 8-byte band;
    /// EOF detection must check the packet length as well.
    pub const END_OF_FILE: u8 = 0xFE;

    pub const ERROR: u8 = 0xFF;
}
