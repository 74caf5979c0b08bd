//! USB composite device construction and the tasks that service it.
//!
//! Initialises the Embassy USB stack on the RP2040 USB peripheral and
//! exposes one HID keyboard interface and one CDC-ACM console interface.

use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_usb::class::cdc_acm::{CdcAcmClass, State as CdcState};
use embassy_usb::class::hid::{
    Config as HidConfig, HidReader, HidReaderWriter, HidWriter, ReportId, RequestHandler,
    State as HidState,
};
use embassy_usb::control::OutResponse;
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, Config, Handler, UsbDevice};
use static_cell::StaticCell;

use super::{CONSOLE_COMMANDS, LED_REPORTS, REPORTS, USB_EVENTS, WAKEUP};
use crate::config;
use crate::console;
use crate::hid::{self, KEYBOARD_REPORT_DESCRIPTOR, KEYBOARD_REPORT_SIZE};
use crate::lifecycle::Event;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

type UsbDriver = Driver<'static, USB>;

static HID_STATE: StaticCell<HidState> = StaticCell::new();
static CDC_STATE: StaticCell<CdcState> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static BUS_HANDLER: StaticCell<BusEventHandler> = StaticCell::new();

/// Build result containing the device runner and the class endpoints.
pub struct UsbStack {
    pub device: UsbDevice<'static, UsbDriver>,
    pub hid_reader: HidReader<'static, UsbDriver, 1>,
    pub hid_writer: HidWriter<'static, UsbDriver, 8>,
    pub console_port: CdcAcmClass<'static, UsbDriver>,
}

/// Initialise the USB stack and create the keyboard + console device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usb: USB) -> UsbStack {
    let driver = Driver::new(usb, Irqs);

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    // Build the USB device.
    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    builder.handler(BUS_HANDLER.init(BusEventHandler::new()));

    let hid_config = HidConfig {
        report_descriptor: KEYBOARD_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let hid = HidReaderWriter::<_, 1, 8>::new(
        &mut builder,
        HID_STATE.init(HidState::new()),
        hid_config,
    );
    let (hid_reader, hid_writer) = hid.split();

    let console_port = CdcAcmClass::new(&mut builder, CDC_STATE.init(CdcState::new()), 64);

    let device = builder.build();

    info!("USB device initialised (keyboard + console)");

    UsbStack {
        device,
        hid_reader,
        hid_writer,
        console_port,
    }
}

/// Forwards bus callbacks into the lifecycle event channel.
///
/// Invoked from inside the device runner; a full channel drops the event
/// rather than blocking the stack.
struct BusEventHandler {
    remote_wakeup_enabled: bool,
}

impl BusEventHandler {
    const fn new() -> Self {
        Self {
            remote_wakeup_enabled: false,
        }
    }

    fn publish(&self, event: Event) {
        if USB_EVENTS.try_send(event).is_err() {
            warn!("lifecycle event dropped: {:?}", event);
        }
    }
}

impl Handler for BusEventHandler {
    fn configured(&mut self, configured: bool) {
        self.publish(if configured {
            Event::Mounted
        } else {
            Event::Unmounted
        });
    }

    fn suspended(&mut self, suspended: bool) {
        if suspended {
            self.publish(Event::Suspended {
                remote_wakeup: self.remote_wakeup_enabled,
            });
        } else {
            self.publish(Event::Resumed);
        }
    }

    fn remote_wakeup_enabled(&mut self, enabled: bool) {
        self.remote_wakeup_enabled = enabled;
    }
}

/// Handles keyboard-class control requests: OUTPUT reports carry the host
/// LED state, GET_REPORT is left unimplemented (stall).
struct LedReportHandler;

impl RequestHandler for LedReportHandler {
    fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        None
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        if let ReportId::In(_) | ReportId::Feature(_) = id {
            return OutResponse::Rejected;
        }
        match hid::parse_output_report(data) {
            Ok(mask) => LED_REPORTS.signal(mask),
            // Malformed payload: ignore, no state change.
            Err(_) => warn!("empty OUTPUT report ignored"),
        }
        OutResponse::Accepted
    }
}

/// Run the USB device stack - must be spawned as a dedicated task.
///
/// Handles enumeration, suspend/resume, and endpoint servicing, and turns
/// the pipeline's wakeup signal into a bus remote-wakeup while suspended.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    loop {
        device.run_until_suspend().await;
        match select(device.wait_resume(), WAKEUP.wait()).await {
            Either::First(()) => {}
            Either::Second(()) => {
                if device.remote_wakeup().await.is_err() {
                    warn!("remote wakeup rejected");
                }
            }
        }
    }
}

/// Drain the report channel into the keyboard endpoint.
pub async fn hid_writer_task(mut writer: HidWriter<'static, UsbDriver, 8>) -> ! {
    info!("HID writer task started");
    let mut buf = [0u8; KEYBOARD_REPORT_SIZE];
    loop {
        let report = REPORTS.receive().await;
        let n = report.serialize(&mut buf);
        if let Err(_e) = writer.write(&buf[..n]).await {
            warn!("USB keyboard write failed");
        }
    }
}

/// Service host→device keyboard traffic (LED OUTPUT reports).
pub async fn hid_reader_task(reader: HidReader<'static, UsbDriver, 1>) -> ! {
    let mut handler = LedReportHandler;
    reader.run(false, &mut handler).await
}

/// Serve console connections forever.
pub async fn console_task(mut port: CdcAcmClass<'static, UsbDriver>) -> ! {
    loop {
        port.wait_connection().await;
        info!("console connected");
        let _ = serve_console(&mut port).await;
        info!("console disconnected");
    }
}

async fn serve_console(port: &mut CdcAcmClass<'static, UsbDriver>) -> Result<(), EndpointError> {
    let mut buf = [0u8; 64];
    loop {
        let n = port.read_packet(&mut buf).await?;
        for &byte in &buf[..n] {
            match console::parse(byte) {
                Ok(cmd) => {
                    CONSOLE_COMMANDS.send(cmd).await;
                    port.write_packet(console::REPLY_OK.as_bytes()).await?;
                }
                Err(err) => warn!("console: {:?}", err),
            }
        }
    }
}
