//! cooprun - serve a queue of pizza orders on one thread, cooperatively.

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::Parser;
use crossbeam::channel;
use tracing_subscriber::EnvFilter;
use cooprun::cfg::{ClockKind, RunnerCfg, SchedulingMode};
use cooprun::event::{ConsoleRenderer, OutputFormat};
use cooprun::utils::{set_panic_hook, timed};
use cooprun::workflow::Customer;

#[derive(Parser)]
#[command(name = "cooprun")]
#[command(about = "Serve pizza orders concurrently on a single thread", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Customer as NAME:GUESSES, repeatable. Replaces the configured customers
    #[arg(long = "customer")]
    customers: Vec<Customer>,

    /// Length of one earlier guess
    #[arg(long)]
    choosing_period_ms: Option<u64>,

    /// Length of the cooking wait
    #[arg(long)]
    cook_duration_ms: Option<u64>,

    /// Length of the blocking ordering step, defaults to the choosing period
    #[arg(long)]
    order_duration_ms: Option<u64>,

    /// Use virtual time: the run finishes at once with the same timeline
    #[arg(long)]
    simulated: bool,

    /// Serve customers one after another instead of interleaving them
    #[arg(long)]
    sequential: bool,

    /// Print events as JSON lines
    #[arg(long)]
    json: bool,

    /// Pin the runner to this core
    #[arg(long)]
    core: Option<usize>,
}

impl Cli {
    fn into_cfg(self) -> Result<RunnerCfg> {
        let mut cfg = match &self.config {
            Some(path) => RunnerCfg::from_json_file(path).context("loading configuration")?,
            None => RunnerCfg::default(),
        };

        if !self.customers.is_empty() {
            cfg.set_customers(self.customers);
        }
        if let Some(ms) = self.choosing_period_ms {
            cfg.set_choosing_period(Duration::from_millis(ms));
        }
        if let Some(ms) = self.cook_duration_ms {
            cfg.set_cook_duration(Duration::from_millis(ms));
        }
        if let Some(ms) = self.order_duration_ms {
            cfg.set_order_duration(Duration::from_millis(ms));
        }
        if self.simulated {
            cfg.set_clock(ClockKind::Simulated);
        }
        if self.sequential {
            cfg.set_mode(SchedulingMode::Sequential);
        }
        if let Some(core) = self.core {
            cfg.set_core(core);
        }

        Ok(cfg)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    set_panic_hook("cooprun".to_string());

    let cli = Cli::parse();
    let format = if cli.json { OutputFormat::Json } else { OutputFormat::Text };
    let cfg = cli.into_cfg()?;

    let renderer = ConsoleRenderer::new(Local::now(), format);
    let (sender, receiver) = channel::unbounded();
    let printer = {
        let renderer = renderer.clone();
        std::thread::Builder::new()
            .name("event printer".to_string())
            .spawn(move || {
                for event in receiver {
                    println!("{}", renderer.render(&event));
                }
            })
            .context("failed to create printer thread")?
    };

    let (res, _) = timed("cooprun", || cooprun::run(&cfg, Some(sender)));
    printer.join().map_err(|_| anyhow!("printer thread panicked"))?;

    let report = res?;
    println!("{}", renderer.render_summary(&report));

    Ok(())
}
