use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use embassy_executor::{Executor, Spawner};
use embassy_time::{Duration, Timer};
use hwc_core::utils::controllers::{DRIVE_CHANNEL, DriveCommand, SENSOR_CHANNEL, SensorEvent};
use hwc_core::utils::gesture::WheelCenter;
use hwc_core::utils::{ClassifierConfig, SessionPlan, WheelController};
use static_cell::StaticCell;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Steer from the line between the palms
    Simple,
    /// Steer from each palm's line to the wheel center
    Calibrated,
}

#[derive(Parser)]
#[clap(version = "1.0")]
struct Opts {
    /// Recorded sensor session, one JSON event per line
    #[clap(long)]
    recording: PathBuf,
    /// Steering strategy for the session
    #[clap(long, value_enum, default_value = "simple")]
    mode: Mode,
    /// Average the first frames into a wheel center (implies calibrated mode)
    #[clap(long)]
    calibrate: bool,
    /// Frames in the calibration window
    #[clap(long, default_value_t = 50)]
    calibration_frames: usize,
    /// Wheel center X (mm) for calibrated mode without calibration
    #[clap(long, allow_negative_numbers = true)]
    center_x: Option<f32>,
    /// Wheel center Z (mm) for calibrated mode without calibration
    #[clap(long, allow_negative_numbers = true)]
    center_z: Option<f32>,
    /// Steering dead zone in degrees (simple mode)
    #[clap(long)]
    dead_zone: Option<f32>,
    /// Maximum angle between the hand lines in degrees (calibrated mode)
    #[clap(long)]
    line_tolerance: Option<f32>,
    /// Delay between replayed events
    #[clap(long, default_value_t = 10)]
    frame_interval_ms: u64,
    /// Seconds counted down before calibration and before steering
    #[clap(long, default_value_t = 3)]
    countdown: u64,
    /// Print drive commands as JSON instead of console lines
    #[clap(long)]
    json: bool,
}

impl Opts {
    fn plan(&self) -> SessionPlan {
        if self.calibrate {
            return SessionPlan::CalibrateThenWheel {
                frames: self.calibration_frames,
            };
        }
        match self.mode {
            Mode::Simple => SessionPlan::Simple,
            Mode::Calibrated => SessionPlan::Calibrated {
                center: WheelCenter::new(
                    self.center_x.unwrap_or(0.0),
                    self.center_z.unwrap_or(0.0),
                ),
            },
        }
    }
}

/// Load a recorded session, rejecting it at the first malformed line.
fn load_recording(path: &Path) -> Result<Vec<SensorEvent>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading recording {}", path.display()))?;
    let mut events = Vec::new();
    for (n, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let event = SensorEvent::from_json(line)
            .with_context(|| format!("{}:{}: invalid sensor event", path.display(), n + 1))?;
        events.push(event);
    }
    if events.is_empty() {
        bail!("recording {} contains no events", path.display());
    }
    Ok(events)
}

/// Index of the event that closes a calibration window of `frames` frames,
/// or `None` when the recording ends first.
fn calibration_end(
    events: &[SensorEvent],
    frames: usize,
) -> Option<usize> {
    events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, SensorEvent::Frame(_)))
        .nth(frames.max(1) - 1)
        .map(|(i, _)| i)
}

async fn countdown(secs: u64) {
    for n in (1..=secs).rev() {
        info!("Ready in {}", n);
        Timer::after(Duration::from_secs(1)).await;
    }
}

#[embassy_executor::task]
async fn controller_task(mut ctrl: WheelController) -> ! {
    ctrl.sensor_ch().await
}

#[embassy_executor::task]
async fn console_task(json: bool) {
    loop {
        let cmd = DRIVE_CHANNEL.receiver().receive().await;
        if json {
            match cmd.to_json() {
                Ok(line) => println!("{}", line),
                Err(e) => error!("failed to encode {:?}: {}", cmd, e),
            }
        } else {
            println!("{}", cmd);
        }
        if let DriveCommand::Exit = cmd {
            std::process::exit(0);
        }
    }
}

#[embassy_executor::task]
async fn replay_task(
    events: Vec<SensorEvent>,
    interval: Duration,
    countdown_secs: u64,
    calibration_frames: Option<usize>,
) {
    let wheel_start = calibration_frames.and_then(|n| calibration_end(&events, n));
    if calibration_frames.is_some() {
        info!("Put your hands on the wheel and turn it");
    } else {
        info!("Starting WheelMode");
    }
    countdown(countdown_secs).await;

    let mut exited = false;
    for (i, event) in events.into_iter().enumerate() {
        exited = matches!(event, SensorEvent::Exit);
        SENSOR_CHANNEL.send(event).await;
        Timer::after(interval).await;
        if wheel_start == Some(i) {
            info!("Starting WheelMode");
            countdown(countdown_secs).await;
        }
    }
    if !exited {
        SENSOR_CHANNEL.send(SensorEvent::Exit).await;
    }
}

#[embassy_executor::task]
async fn main_task(
    spawner: Spawner,
    opts: Opts,
    events: Vec<SensorEvent>,
) {
    let config = ClassifierConfig::new(opts.dead_zone, opts.line_tolerance);
    let plan = opts.plan();
    info!(?plan, ?config, events = events.len(), "session configured");

    let ctrl = WheelController::new(plan, config);
    if let Err(e) = spawner.spawn(console_task(opts.json)) {
        error!("failed to spawn console task: {:?}", e);
        return;
    }
    if let Err(e) = spawner.spawn(controller_task(ctrl)) {
        error!("failed to spawn controller task: {:?}", e);
        return;
    }
    let interval = Duration::from_millis(opts.frame_interval_ms);
    let calibration_frames = match plan {
        SessionPlan::CalibrateThenWheel { frames } => Some(frames),
        _ => None,
    };
    if let Err(e) = spawner.spawn(replay_task(events, interval, opts.countdown, calibration_frames)) {
        error!("failed to spawn replay task: {:?}", e);
    }
}

static EXECUTOR: StaticCell<Executor> = StaticCell::new();

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts: Opts = Opts::parse();
    let events = load_recording(&opts.recording)?;

    let executor = EXECUTOR.init(Executor::new());
    executor.run(|spawner| {
        if let Err(e) = spawner.spawn(main_task(spawner, opts, events)) {
            error!("failed to spawn main task: {:?}", e);
            std::process::exit(1);
        }
    })
}
