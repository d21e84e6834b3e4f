//! UART driver for STM32L4
//!
//! Blocking USART used as the operator terminal.

use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::{self, Error as UsartError, Uart};

use cadence_hal::uart::{DataBits, Parity, StopBits, UartConfig};
use cadence_hal::{UartRx, UartTx};

/// Translate a terminal configuration to embassy-stm32 USART settings
pub fn usart_config(config: &UartConfig) -> usart::Config {
    let mut usart_config = usart::Config::default();
    usart_config.baudrate = config.baudrate;
    usart_config.data_bits = match config.data_bits {
        DataBits::Seven => usart::DataBits::DataBits7,
        DataBits::Eight => usart::DataBits::DataBits8,
        DataBits::Nine => usart::DataBits::DataBits9,
    };
    usart_config.parity = match config.parity {
        Parity::None => usart::Parity::ParityNone,
        Parity::Even => usart::Parity::ParityEven,
        Parity::Odd => usart::Parity::ParityOdd,
    };
    usart_config.stop_bits = match config.stop_bits {
        StopBits::One => usart::StopBits::STOP1,
        StopBits::Two => usart::StopBits::STOP2,
    };
    usart_config
}

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Buffer too long for a single transfer
    BufferTooLong,
    /// Other error
    Other,
}

impl From<UsartError> for UartBusError {
    fn from(e: UsartError) -> Self {
        match e {
            UsartError::Framing => UartBusError::Framing,
            UsartError::Noise => UartBusError::Noise,
            UsartError::Overrun => UartBusError::Overrun,
            UsartError::Parity => UartBusError::Parity,
            UsartError::BufferTooLong => UartBusError::BufferTooLong,
            _ => UartBusError::Other,
        }
    }
}

/// Blocking serial port on an embassy-stm32 USART
pub struct SerialPort<'d> {
    uart: Uart<'d, Blocking>,
}

impl<'d> SerialPort<'d> {
    pub fn new(uart: Uart<'d, Blocking>) -> Self {
        Self { uart }
    }
}

impl UartTx for SerialPort<'_> {
    type Error = UartBusError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), UartBusError> {
        self.uart.blocking_write(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), UartBusError> {
        self.uart.blocking_flush()?;
        Ok(())
    }
}

impl UartRx for SerialPort<'_> {
    type Error = UartBusError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, UartBusError> {
        self.uart.blocking_read(buf)?;
        Ok(buf.len())
    }

    fn try_read_byte(&mut self) -> Result<Option<u8>, UartBusError> {
        match self.uart.nb_read() {
            Ok(byte) => Ok(Some(byte)),
            Err(nb::Error::WouldBlock) => Ok(None),
            Err(nb::Error::Other(e)) => Err(e.into()),
        }
    }
}
