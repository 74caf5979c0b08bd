//! Embedded entry point - RP2040 bring-up and the cooperative pipeline.
//!
//! One task owns the whole scan→report pipeline and ticks it every
//! millisecond; each stage self-throttles to its own cadence against the
//! shared clock. The USB stack, HID endpoints, and console run as their
//! own tasks and talk to the pipeline only through the channels in
//! `matrixpad::usb`.

#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_time::{Duration, Instant, Ticker};
use embassy_usb::class::cdc_acm::CdcAcmClass;
use embassy_usb::class::hid::{HidReader, HidWriter};
use embassy_usb::UsbDevice;
use panic_probe as _;

use matrixpad::board::{self, Board};
use matrixpad::config;
use matrixpad::console;
use matrixpad::led::StatusBlinker;
use matrixpad::lifecycle::Lifecycle;
use matrixpad::matrix::{Debounce, Keymap, Scanner, Snapshot};
use matrixpad::report::ReportScheduler;
use matrixpad::usb::{self, device};

type UsbDriver = Driver<'static, USB>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let (board, usb_periph) = board::init(p);
    let stack = device::init(usb_periph);

    spawner.must_spawn(usb_task(stack.device));
    spawner.must_spawn(hid_writer_task(stack.hid_writer));
    spawner.must_spawn(hid_reader_task(stack.hid_reader));
    spawner.must_spawn(console_task(stack.console_port));
    spawner.must_spawn(pipeline_task(board));

    info!("matrixpad running");
}

#[embassy_executor::task]
async fn usb_task(dev: UsbDevice<'static, UsbDriver>) -> ! {
    device::run_usb_device(dev).await
}

#[embassy_executor::task]
async fn hid_writer_task(writer: HidWriter<'static, UsbDriver, 8>) -> ! {
    device::hid_writer_task(writer).await
}

#[embassy_executor::task]
async fn hid_reader_task(reader: HidReader<'static, UsbDriver, 1>) -> ! {
    device::hid_reader_task(reader).await
}

#[embassy_executor::task]
async fn console_task(port: CdcAcmClass<'static, UsbDriver>) -> ! {
    device::console_task(port).await
}

/// The cooperative loop: drain cross-task events, then tick every stage.
#[embassy_executor::task]
async fn pipeline_task(board: Board) -> ! {
    let Board { mut matrix, mut led } = board;

    let mut scanner = Scanner::new();
    let mut debounce = Debounce::new(config::DEBOUNCE_HOLD_TICKS);
    let mut keymap = Keymap::default();
    let mut lifecycle = Lifecycle::new();
    let mut blinker = StatusBlinker::new();
    let mut scheduler = ReportScheduler::new();
    let mut sink = usb::StackSink;
    let mut keys = Snapshot::default();

    let mut ticker = Ticker::every(Duration::from_millis(1));
    loop {
        ticker.next().await;
        let now = Instant::now().as_millis();

        while let Ok(event) = usb::USB_EVENTS.try_receive() {
            info!("usb: {:?}", event);
            lifecycle.handle(event);
        }
        while let Ok(cmd) = usb::CONSOLE_COMMANDS.try_receive() {
            if let Some(level) = console::apply(cmd, &mut keymap, &mut blinker) {
                drive_led(&mut led, level);
            }
        }
        if let Some(mask) = usb::LED_REPORTS.try_take() {
            drive_led(&mut led, blinker.set_latched(mask.caps_lock()));
        }

        if scanner.poll(now, &mut matrix) {
            keys = debounce.settle(&scanner.snapshot());
        }
        scheduler.poll(now, &keys, &keymap, &lifecycle, &mut sink);
        if let Some(level) = blinker.poll(now, lifecycle.blink_interval_ms()) {
            drive_led(&mut led, level);
        }
    }
}

fn drive_led(led: &mut Output<'static>, on: bool) {
    if on {
        led.set_high()
    } else {
        led.set_low()
    }
}
