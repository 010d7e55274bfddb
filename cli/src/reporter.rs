//! Text rendering of events and run summaries

use atm_simulator_core::{Event, EventSink, Pause, SimulationReport, TerminationReason};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Writes one line per event and optionally sleeps through pauses
pub struct TextReporter<W: Write> {
    out: W,
    show_events: bool,
    animate: bool,
    /// First write error; the sink interface cannot propagate it
    error: Option<io::Error>,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_events: true,
            animate: false,
            error: None,
        }
    }

    pub fn with_events(mut self, show: bool) -> Self {
        self.show_events = show;
        self
    }

    pub fn with_animation(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Flush and hand back the writer, surfacing any deferred write error
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> EventSink for TextReporter<W> {
    fn on_event(&mut self, event: &Event) {
        if !self.show_events || self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{}", event) {
            self.error = Some(err);
        }
    }

    fn on_pause(&mut self, _pause: Pause, duration_ms: u64) {
        if self.animate {
            thread::sleep(Duration::from_millis(duration_ms));
        }
    }
}

/// Final summary: totals, then per-device and per-customer ledgers
pub fn write_summary<W: Write>(out: &mut W, report: &SimulationReport) -> io::Result<()> {
    let stats = &report.statistics;

    writeln!(out)?;
    writeln!(out, "### Simulation Summary")?;
    writeln!(out, "- Total Successful Transactions: {}", stats.successful_transactions)?;
    writeln!(out, "- Total Failed Transactions: {}", stats.failed_transactions)?;
    writeln!(out, "- Total Attempts: {}", stats.total_attempts)?;
    writeln!(out, "- Deposits: {}", stats.deposits)?;
    writeln!(out, "- Maintenance Events: {}", stats.maintenance_events)?;
    writeln!(
        out,
        "- Average Transaction Time: {:.2} seconds",
        stats.average_latency_ms() / 1000.0
    )?;
    writeln!(
        out,
        "- Rounds: {} ({})",
        report.rounds_completed,
        termination_label(report.termination)
    )?;

    writeln!(out)?;
    writeln!(out, "### ATM Statistics")?;
    for atm in &report.atms {
        writeln!(out, "{}:", atm.label())?;
        writeln!(out, "  - Cash Balance: ${}", atm.cash_reserve())?;
        writeln!(
            out,
            "  - Status: {}",
            if atm.is_enabled() { "online" } else { "out of service" }
        )?;
        writeln!(out, "  - Transactions:")?;
        for entry in atm.ledger().iter() {
            writeln!(out, "    {}", entry)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "### Customer Statistics")?;
    for customer in &report.customers {
        writeln!(out, "{}:", customer.name())?;
        writeln!(out, "  - Balance: ${}", customer.balance())?;
        writeln!(out, "  - Transactions:")?;
        for entry in customer.ledger().iter() {
            writeln!(out, "    {}", entry)?;
        }
    }

    Ok(())
}

fn termination_label(reason: Option<TerminationReason>) -> &'static str {
    match reason {
        Some(TerminationReason::AllDevicesDown) => "all ATMs down",
        Some(TerminationReason::RoundLimitReached) => "round limit reached",
        None => "still running",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atm_simulator_core::{Orchestrator, SimulationConfig};

    fn small_run() -> (SimulationReport, Vec<u8>) {
        let config = SimulationConfig {
            num_customers: 2,
            num_atms: 1,
            max_rounds: Some(3),
            rng_seed: 11,
            ..Default::default()
        };
        let mut orchestrator = Orchestrator::new(config).unwrap();
        let mut reporter = TextReporter::new(Vec::new());
        let report = orchestrator.run_with(&mut reporter).unwrap();
        (report, reporter.finish().unwrap())
    }

    #[test]
    fn test_one_line_per_event() {
        let config = SimulationConfig {
            num_customers: 3,
            num_atms: 2,
            max_rounds: Some(4),
            rng_seed: 8,
            ..Default::default()
        };
        let mut orchestrator = Orchestrator::new(config).unwrap();
        let mut reporter = TextReporter::new(Vec::new());
        orchestrator.run_with(&mut reporter).unwrap();

        let text = String::from_utf8(reporter.finish().unwrap()).unwrap();
        assert_eq!(text.lines().count(), orchestrator.event_log().len());
    }

    #[test]
    fn test_quiet_reporter_writes_nothing() {
        let config = SimulationConfig {
            max_rounds: Some(2),
            ..Default::default()
        };
        let mut orchestrator = Orchestrator::new(config).unwrap();
        let mut reporter = TextReporter::new(Vec::new()).with_events(false);
        orchestrator.run_with(&mut reporter).unwrap();

        assert!(reporter.finish().unwrap().is_empty());
    }

    #[test]
    fn test_summary_lists_every_agent() {
        let (report, _) = small_run();
        let mut out = Vec::new();
        write_summary(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("### Simulation Summary"));
        assert!(text.contains("ATM-0:"));
        assert!(text.contains("Customer-0:"));
        assert!(text.contains("Customer-1:"));
        assert!(text.contains(&format!(
            "- Total Attempts: {}",
            report.statistics.total_attempts
        )));
    }
}
