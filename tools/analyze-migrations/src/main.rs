use std::fs;
use std::path::PathBuf;

use clap::Parser;

use migration_analysis::comparison::merge_summaries;
use migration_analysis::execution_time::{analyze_execution_times, ExecutionTimeSummary};
use migration_analysis::loader::load_results;
use migration_analysis::placement::{analyze_placements, PlacementSummary};
use migration_analysis::power::{analyze_power, PowerSummary};
use migration_analysis::report::{save_comparison_csv, save_placement_csv, save_results_json};

mod plot;

fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
/// Summarizes and compares VM migration simulation results
struct Args {
    /// Path to the directory with migration result files
    #[arg(short, long, default_value = "migrations_results")]
    results: PathBuf,

    /// Path to the directory for produced reports and plots
    #[arg(short, long, default_value = "plots")]
    output: PathBuf,
}

fn print_power_summary(strategy: &str, summary: &PowerSummary) {
    println!("\n{} power statistics:", strategy);
    println!("- total power consumption = {:.2} W", summary.total_power_consumption);
    println!(
        "- average power consumption = {:.2} W",
        summary.average_power_consumption
    );
    println!("- max power consumption = {:.2} W", summary.max_power_consumption);
    println!("- active hosts = {}", summary.active_hosts);
    println!(
        "- total energy consumption = {:.2} Wh",
        summary.total_energy_consumption
    );
}

fn print_policy_summary(
    strategy: &str,
    summary: &ExecutionTimeSummary,
    placement: Option<&PlacementSummary>,
) {
    println!("\n{} policy statistics:", strategy);
    println!("- cloudlets = {}", summary.cloudlet_count);
    match &summary.stats {
        Some(stats) => {
            println!("- average execution time = {:.2} s", stats.avg);
            println!(
                "- min/max execution time = {:.2}/{:.2} s",
                stats.min, stats.max
            );
            println!("- total execution time = {:.2} s", stats.total);
        }
        None => println!("- no usable execution time values"),
    }
    if let Some(placement) = placement {
        println!("- max VMs per host = {}", placement.max_vms_per_host);
        println!("- min VMs per host = {}", placement.min_vms_per_host);
    }
}

fn main() -> std::io::Result<()> {
    init_logger();
    let args = Args::parse();

    let tables = load_results(&args.results)?;
    println!(
        "Loaded {} power and {} policy tables from {}",
        tables.power.len(),
        tables.policy.len(),
        args.results.display()
    );
    for skipped in &tables.skipped {
        println!("Skipped {}: {}", skipped.path.display(), skipped.reason);
    }

    let power_results = analyze_power(&tables);
    let time_results = analyze_execution_times(&tables);
    let placements = analyze_placements(&tables);

    for (strategy, summary) in &power_results {
        print_power_summary(strategy, summary);
    }
    for (strategy, summary) in &time_results {
        print_policy_summary(strategy, summary, placements.get(strategy));
    }

    fs::create_dir_all(&args.output)?;
    let records = merge_summaries(&power_results, &time_results);
    save_comparison_csv(&records, &args.output.join("strategy_comparison.csv"))?;
    save_placement_csv(&placements, &args.output.join("vm_distribution.csv"))?;
    save_results_json(&records, &placements, &args.output.join("results.json"))?;

    if power_results.is_empty() {
        println!("\nNo power data found to plot");
    } else {
        plot::plot_total_energy(&power_results, &args.output.join("total_energy_comparison.png"));
    }
    for (strategy, summary) in &placements {
        if !summary.vms_per_host.is_empty() {
            plot::plot_vm_distribution(
                strategy,
                summary,
                &args.output.join(format!("vm_distribution_{}.png", strategy)),
            );
        }
    }

    println!("\nReports saved to {}", args.output.display());
    Ok(())
}
