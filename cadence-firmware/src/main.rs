//! Cadence - Two-Servo Recipe Controller Firmware
//!
//! Main firmware binary for STM32L476-based boards (NUCLEO-L476RG).
//! Two hobby servos on TIM2 each run a bytecode recipe, driven from a
//! serial terminal on USART2 (the ST-LINK virtual COM port).

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::OutputType;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::usart::Uart;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use cadence_core::traits::ServoDriver;
use cadence_core::{Controller, Halted};
use cadence_drivers::clock::CounterClock;
use cadence_drivers::console::UartConsole;
use cadence_drivers::servo::PwmServoPair;
use cadence_hal::uart::UartConfig;
use cadence_hal_stm32l4::pwm::frame_rate;
use cadence_hal_stm32l4::{usart_config, MillisCounter, SerialPort};

use crate::config::load_config;

mod config;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Cadence firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Servo outputs: TIM2 CH1 on PA0, CH2 on PA1
    let frame: Hertz = frame_rate(config.calibration.period_us);
    let pwm = SimplePwm::new(
        p.TIM2,
        Some(PwmPin::new(p.PA0, OutputType::PushPull)),
        Some(PwmPin::new(p.PA1, OutputType::PushPull)),
        None,
        None,
        frame,
        CountingMode::EdgeAlignedUp,
    );
    let channels = pwm.split();
    let mut ch1 = channels.ch1;
    let mut ch2 = channels.ch2;
    ch1.enable();
    ch2.enable();

    let mut servos = PwmServoPair::new(ch1, ch2, config.calibration);
    servos.home_all();
    if let Some(actor) = servos.take_fault() {
        warn!("Servo {} PWM channel rejected the home pulse", actor);
    }
    info!("Servos homed at {} Hz frame rate", frame.0);

    // Operator terminal: USART2, TX on PA2, RX on PA3
    let uart_config = usart_config(&UartConfig::terminal(config.console.baudrate));
    let uart = match Uart::new_blocking(p.USART2, p.PA3, p.PA2, uart_config) {
        Ok(uart) => uart,
        Err(e) => {
            error!("USART2 configuration rejected: {:?}", e);
            halt();
        }
    };
    let console = UartConsole::new(SerialPort::new(uart));
    info!("Console on USART2 at {} baud", config.console.baudrate);

    let clock = CounterClock::new(MillisCounter::new(), MillisCounter::new());

    let mut controller = Controller::new(&config, clock, servos, Delay, console);
    controller.print_banner();

    info!("Cadence ready");

    loop {
        if let Err(Halted) = controller.poll() {
            error!(
                "Halted by operator after a recipe fault ({} receive errors)",
                controller.console().rx_errors()
            );
            halt();
        }
    }
}

/// Stop here until the board is reset
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
