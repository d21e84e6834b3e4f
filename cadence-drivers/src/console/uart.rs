//! Operator console over a UART
//!
//! Receive errors (overrun, framing, noise) are not reported to the
//! operator: a blocking read retries and a non-blocking poll reports
//! nothing waiting. Transmit errors surface as [`core::fmt::Error`].

use core::fmt;

use cadence_core::traits::Console;
use cadence_hal::{UartRx, UartTx};

/// Serial terminal on a UART peripheral
pub struct UartConsole<U> {
    uart: U,
    /// Receive errors seen since creation
    rx_errors: u32,
}

impl<U: UartTx + UartRx> UartConsole<U> {
    pub fn new(uart: U) -> Self {
        Self { uart, rx_errors: 0 }
    }

    /// Number of receive errors dropped so far
    pub fn rx_errors(&self) -> u32 {
        self.rx_errors
    }
}

impl<U: UartTx + UartRx> fmt::Write for UartConsole<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.uart.write_blocking(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

impl<U: UartTx + UartRx> Console for UartConsole<U> {
    fn read_byte(&mut self) -> u8 {
        loop {
            match self.uart.read_byte() {
                Ok(byte) => return byte,
                Err(_) => self.rx_errors = self.rx_errors.wrapping_add(1),
            }
        }
    }

    fn try_read_byte(&mut self) -> Option<u8> {
        match self.uart.try_read_byte() {
            Ok(byte) => byte,
            Err(_) => {
                self.rx_errors = self.rx_errors.wrapping_add(1);
                None
            }
        }
    }
}
