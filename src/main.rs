//! Process dashboard in the terminal
//!
//! Run: ./target/release/nexgen [--data-dir DIR] [view]
//! Views: all, executive, deviation, simulate, raw

use anyhow::Result;
use clap::{Parser, Subcommand};
use nexgen_intel::api::DashboardService;
use nexgen_intel::config::{init_tracing, DataArgs};
use nexgen_intel::simulator::{RoiHorizon, Scenario};
use nexgen_intel::ProcessTable;

#[derive(Parser, Debug)]
#[command(name = "nexgen")]
#[command(about = "Process mining and value leakage views over order fulfillment data")]
struct Cli {
    #[command(flatten)]
    data: DataArgs,

    #[command(subcommand)]
    view: Option<View>,
}

#[derive(Subcommand, Debug)]
enum View {
    /// Every view in sequence
    All,
    /// KPIs, leakage by outcome, carrier efficiency, recommended actions
    Executive,
    /// Process flow, root causes and the riskiest orders
    Deviation {
        /// How many high-risk orders to list
        #[arg(long, default_value = "10")]
        top: usize,
    },
    /// Project savings from reducing deviation drivers
    Simulate {
        /// Reduce delay frequency (%), 0-50
        #[arg(long, default_value = "20")]
        delay_reduction: f64,
        /// Reduce damage rate (%), 0-50
        #[arg(long, default_value = "10")]
        damage_reduction: f64,
        /// Route optimization saving (%), 0-30
        #[arg(long, default_value = "15")]
        route_saving: f64,
    },
    /// Browse the process table
    Raw {
        #[arg(long, default_value = "25")]
        limit: usize,
        /// Print every column as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn print_section_header(title: &str) {
    println!("\n{}", "═".repeat(80));
    println!("  {}", title);
    println!("{}\n", "═".repeat(80));
}

fn print_subsection(title: &str) {
    println!("\n{}", title);
    println!("{}", "─".repeat(70));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let table = ProcessTable::load(&cli.data.source())?;
    let service = DashboardService::new(table);

    println!("\n{}", "█".repeat(80));
    println!("{}  NEXGEN INTELLIGENCE - Process Mining & Value Realization  {}", "█".repeat(9), "█".repeat(10));
    println!("{}\n", "█".repeat(80));

    match cli.view.unwrap_or(View::All) {
        View::All => {
            run_executive(&service);
            run_deviation(&service, 10);
            run_simulation(&service, &Scenario::default())?;
            run_raw(&service, 25, false)?;
        }
        View::Executive => run_executive(&service),
        View::Deviation { top } => run_deviation(&service, top),
        View::Simulate {
            delay_reduction,
            damage_reduction,
            route_saving,
        } => run_simulation(
            &service,
            &Scenario {
                delay_reduction,
                damage_reduction,
                route_saving,
            },
        )?,
        View::Raw { limit, json } => run_raw(&service, limit, json)?,
    }

    println!("\n{}", "█".repeat(80));
    Ok(())
}

fn run_executive(service: &DashboardService) {
    print_section_header("1. EXECUTIVE DASHBOARD - Operational Health Overview");

    let kpi = service.summary();
    println!("  Total Value Leakage:  {:>12}", format!("₹{}", kpi.total_value_leakage as i64));
    println!("  Perfect Order Rate:   {:>11.1}%", kpi.perfect_order_rate);
    println!("  Avg Customer Rating:  {:>12.2}", kpi.avg_customer_rating);
    println!("  Active Deviations:    {:>12}", kpi.active_deviations);
    println!("  Orders:               {:>12}", kpi.orders);

    print_subsection("Leakage by Deviation Type");
    println!("  {:25} {:>15}", "Status", "Leakage (₹)");
    println!("  {}", "─".repeat(41));
    for row in service.leakage_by_status() {
        println!("  {:25} {:>15.2}", truncate(&row.status.to_string(), 25), row.value_leakage);
    }

    print_subsection("Carrier Cost vs Leakage");
    println!("  {:22} {:>8} {:>15} {:>15}", "Carrier", "Orders", "Avg Cost", "Avg Leakage");
    println!("  {}", "─".repeat(62));
    for row in service.carriers() {
        println!(
            "  {:22} {:>8} {:>15.2} {:>15.2}",
            truncate(&row.carrier.to_string(), 22),
            row.orders,
            row.avg_delivery_cost,
            row.avg_value_leakage
        );
    }

    print_subsection("Top Recommended Actions");
    for action in service.actions() {
        println!("  ⚠ {}", action.message);
    }
}

fn run_deviation(service: &DashboardService, top: usize) {
    print_section_header("2. PROCESS DEVIATION MINING");

    let flow = service.flow();
    print_subsection("Process Flow: Priority → Carrier → Outcome");
    println!("  {} nodes, {} links", flow.nodes.len(), flow.links.len());
    println!();
    println!("  {:15} {:22} {:20} {:>8}", "Priority", "Carrier", "Outcome", "Orders");
    println!("  {}", "─".repeat(68));
    for g in &flow.groups {
        println!(
            "  {:15} {:22} {:20} {:>8}",
            truncate(&g.priority.to_string(), 15),
            truncate(&g.carrier.to_string(), 22),
            truncate(&g.status.to_string(), 20),
            g.count
        );
    }

    print_subsection("Root Cause Distribution");
    println!("  {:22} {:>8} {:>15}", "Root Cause", "Orders", "Leakage (₹)");
    println!("  {}", "─".repeat(47));
    for share in service.root_causes() {
        println!("  {:22} {:>8} {:>15.2}", share.root_cause.as_str(), share.orders, share.value_leakage);
    }

    print_subsection(&format!("Highest Risk Orders (Top {})", top));
    println!("  {:14} {:22} {:22} {:>10}", "Order", "Carrier", "Root Cause", "Risk");
    println!("  {}", "─".repeat(70));
    for entry in service.highest_risk(top) {
        println!(
            "  {:14} {:22} {:22} {:>10.3}",
            truncate(&entry.order_id, 14),
            truncate(&entry.carrier.to_string(), 22),
            entry.root_cause.as_str(),
            entry.risk_score
        );
    }
}

fn run_simulation(service: &DashboardService, scenario: &Scenario) -> Result<()> {
    print_section_header("3. VALUE LEAKAGE SIMULATOR - Predictive Value & Simulation");

    let result = service.simulate(scenario)?;
    println!("  Reduce Delay Frequency:     {:>6.1}%", scenario.delay_reduction);
    println!("  Reduce Damage Rate:         {:>6.1}%", scenario.damage_reduction);
    println!("  Route Optimization Saving:  {:>6.1}%", scenario.route_saving);
    println!();
    println!("  Projected Monthly Savings:  {:>12}", format!("₹{}", result.simulated_saving as i64));
    println!("  New Leakage Baseline:       {:>12}", format!("₹{}", result.new_baseline as i64));
    match result.roi_horizon {
        RoiHorizon::Months(months) => println!("  ROI Horizon:                {:>12.1} Months", months),
        RoiHorizon::NotComputable => println!("  ROI Horizon:                {:>12}", "n/a (no saving)"),
    }
    Ok(())
}

fn run_raw(service: &DashboardService, limit: usize, json: bool) -> Result<()> {
    print_section_header("4. RAW DATA EXPLORER");

    let rows = service.orders(limit);
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    println!("  Showing {} of {} orders", rows.len(), service.table().len());
    println!();
    println!(
        "  {:12} {:10} {:16} {:12} {:>5} {:>5} {:>5} {:>10} {:20} {:>6}",
        "Order", "Priority", "Carrier", "Status", "Delay", "Dmg", "Cost+", "Leakage", "Root Cause", "Risk"
    );
    println!("  {}", "─".repeat(112));
    let mark = |b: bool| if b { "✓" } else { "" };
    for row in rows {
        let r = &row.record;
        println!(
            "  {:12} {:10} {:16} {:12} {:>5} {:>5} {:>5} {:>10.2} {:20} {:>6.3}",
            truncate(&r.order_id, 12),
            truncate(&r.priority.to_string(), 10),
            truncate(&r.carrier.to_string(), 16),
            truncate(&r.status.to_string(), 12),
            mark(row.flags.delay),
            mark(row.flags.damage),
            mark(row.flags.cost_overrun),
            row.value_leakage,
            row.root_cause.as_str(),
            row.risk_score
        );
    }
    Ok(())
}
