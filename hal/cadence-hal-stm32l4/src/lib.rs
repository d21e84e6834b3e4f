//! STM32L4-specific HAL for the Cadence firmware
//!
//! This crate provides STM32L4 implementations of the `cadence-hal`
//! traits. It supports:
//!
//! - STM32L476RG (Nucleo-L476RG)
//!
//! # Features
//!
//! - `stm32l476rg` - Enable support for STM32L476RG
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! The firmware brings up peripherals with embassy-stm32 directly and
//! wraps them here: USART2 becomes a [`SerialPort`], and each servo gets
//! a [`MillisCounter`]. Servo PWM on TIM2 uses the constants in [`pwm`].

#![no_std]
#![deny(unsafe_code)]

pub mod pwm;
pub mod timer;
pub mod uart;

pub use timer::MillisCounter;
pub use uart::{usart_config, SerialPort, UartBusError};
