//! Serial terminal link
//!
//! The operator talks to the controller over a single full-duplex UART.
//! Output is always blocking. Input is read blocking at the prompt, and
//! polled without blocking while recipes run so a pause key can be seen.

/// Transmit half of the terminal link
pub trait UartTx {
    type Error;

    /// Send every byte of `data`, blocking until the last one is queued
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Block until the transmitter is idle
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Receive half of the terminal link
pub trait UartRx {
    type Error;

    /// Fill `buf` completely, blocking as long as it takes
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Take a byte that has already arrived, `Ok(None)` if there is none
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Block for the next keystroke
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut key = [0u8];
        self.read_blocking(&mut key)?;
        Ok(key[0])
    }
}

/// Character frame settings of the terminal link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    pub baudrate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// 8N1 at the given baud rate, what every serial terminal expects
    pub const fn terminal(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::terminal(115_200)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
