use anyhow::bail;
use clap::Parser;
use power_shift_scheduler::model_sampling::{BetaSchedule, ModelSampling};
use power_shift_scheduler::registry::{SchedulerRegistry, POWER_SHIFT};
use power_shift_scheduler::sampling::{self, SigmaRequest};
use power_shift_scheduler::schedulers::SchedulerKind;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Registered scheduler to run.
    #[arg(long, default_value = POWER_SHIFT)]
    scheduler: String,

    /// Print the registered scheduler names and exit.
    #[arg(long)]
    list_schedulers: bool,

    /// Scheduler config file; overrides the shape flags below.
    #[arg(long)]
    config: Option<String>,

    #[arg(long, default_value = "20")]
    steps: usize,

    #[arg(long, default_value = "2.0")]
    power: f64,

    #[arg(long, default_value = "1.0")]
    midpoint_shift: f64,

    #[arg(long)]
    discard_penultimate: bool,

    #[arg(long, default_value = "1.0")]
    denoise: f64,

    /// Training beta schedule for the reference sigma table:
    /// linear, scaled-linear or squaredcos.
    #[arg(long, default_value = "scaled-linear")]
    beta_schedule: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let registry = SchedulerRegistry::with_defaults();
    if args.list_schedulers {
        for name in registry.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let beta_schedule = match args.beta_schedule.as_str() {
        "linear" => BetaSchedule::Linear,
        "scaled-linear" => BetaSchedule::ScaledLinear,
        "squaredcos" => BetaSchedule::SquaredcosCapV2,
        other => bail!("unknown beta schedule: {other}"),
    };
    let model = ModelSampling::from_betas(beta_schedule, 0.00085, 0.012, 1000);

    let request = SigmaRequest {
        steps: args.steps,
        power: args.power,
        midpoint_shift: args.midpoint_shift,
        discard_penultimate: args.discard_penultimate,
        denoise: args.denoise,
    }
    .clamped();

    let sigmas = match &args.config {
        Some(path) => {
            let kind = SchedulerKind::from_file(path)?;
            sampling::get_sigmas_with(kind.build().as_ref(), &model, request.steps, request.denoise)?
        }
        None => {
            if !registry.contains(&args.scheduler) {
                bail!("unknown scheduler: {}", args.scheduler);
            }
            sampling::get_sigmas(&model, &request)?
        }
    };

    for sigma in sigmas {
        println!("{sigma}");
    }
    Ok(())
}
