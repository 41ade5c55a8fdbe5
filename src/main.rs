use std::net::{IpAddr, SocketAddr};

use clap::{Parser, Subcommand};
use finflow::core::{
    SimulationInputs, default_month_labels, month_over_month_growth, parse::parse_decimal,
    simulate, summarize_simulation,
};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(
    name = "finflow",
    about = "Income allocation ledger and compounding simulator for the finflow dashboard"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API.
    Serve {
        #[arg(long, env = "FINFLOW_HOST", default_value = "0.0.0.0")]
        host: IpAddr,
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Print a month-by-month compounding table.
    Simulate {
        #[arg(long, default_value = "0.7", value_parser = decimal_arg, help = "Monthly return in percent")]
        return_rate: Decimal,
        #[arg(long, default_value = "450", value_parser = decimal_arg)]
        monthly_contribution: Decimal,
        #[arg(long, default_value = "400", value_parser = decimal_arg, help = "Contribution for the first month only")]
        first_month_contribution: Decimal,
        #[arg(long, value_delimiter = ',', help = "Comma-separated month labels")]
        months: Vec<String>,
    },
}

fn decimal_arg(raw: &str) -> Result<Decimal, String> {
    parse_decimal(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    finflow::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port } => {
            let addr = SocketAddr::new(host, port);
            if let Err(e) = finflow::api::run_http_server(addr).await {
                tracing::error!(%addr, error = %e, "server error");
                std::process::exit(1);
            }
        }
        Command::Simulate {
            return_rate,
            monthly_contribution,
            first_month_contribution,
            months,
        } => {
            let inputs = SimulationInputs {
                return_rate_percent: return_rate,
                monthly_contribution,
                first_month_contribution,
                month_labels: if months.is_empty() {
                    default_month_labels()
                } else {
                    months
                },
            };
            print_simulation(&inputs);
        }
    }
}

fn print_simulation(inputs: &SimulationInputs) {
    let points = simulate(inputs);
    let growth = month_over_month_growth(&points);
    let summary = summarize_simulation(inputs, &points);

    println!(
        "{:<12} {:>12} {:>8} {:>12} {:>10}",
        "month", "initial", "rate %", "final", "growth"
    );
    for (point, delta) in points.iter().zip(&growth) {
        println!(
            "{:<12} {:>12.2} {:>8} {:>12.2} {:>10.2}",
            point.month, point.initial_value, point.return_rate, point.final_value, delta
        );
    }
    println!();
    println!("final value:       {:.2}", summary.final_value);
    println!("total contributed: {:.2}", summary.total_contributed);
    println!("total returns:     {:.2}", summary.total_returns);
}
