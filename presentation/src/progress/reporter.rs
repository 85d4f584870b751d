//! Progress reporting for pipeline execution

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use troupe_application::ports::observer::PipelineObserver;
use troupe_domain::{AgentId, Persona, RunId, RunProgress, Timeline};

/// Reports progress during pipeline execution with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
    current_run: Mutex<Option<RunId>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            current_run: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress template is valid")
            .progress_chars("=>-")
    }

    fn is_current(&self, run: RunId) -> bool {
        *self.current_run.lock().unwrap() == Some(run)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineObserver for ProgressReporter {
    fn on_run_start(&self, run: RunId, total: usize) {
        *self.current_run.lock().unwrap() = Some(run);

        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Troupe");
        pb.set_message("Initializing...");
        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_agent_start(&self, run: RunId, index: usize, total: usize, persona: &Persona) {
        if !self.is_current(run) {
            return;
        }
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            pb.set_message(format!(
                "[{}/{}] {} {} is working...",
                index + 1,
                total,
                persona.icon,
                persona.name
            ));
        }
    }

    fn on_retry(&self, run: RunId, persona: &Persona, attempt: u32, max_attempts: u32) {
        if !self.is_current(run) {
            return;
        }
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            pb.set_message(format!(
                "{} rate limited, retry {}/{}...",
                persona.name,
                attempt,
                max_attempts
            ));
        }
    }

    fn on_agent_complete(
        &self,
        run: RunId,
        persona: &Persona,
        batch_len: usize,
        _progress: &RunProgress,
        _timeline: &Timeline,
    ) {
        if !self.is_current(run) {
            return;
        }
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            pb.set_message(format!(
                "{} {} ({} comments)",
                "v".green(),
                persona.name,
                batch_len
            ));
            pb.inc(1);
        }
    }

    fn on_run_complete(&self, run: RunId) {
        if !self.is_current(run) {
            return;
        }
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_with_message(format!("{}", "All agents finished!".green()));
        }
    }

    fn on_run_failed(&self, run: RunId, agent: AgentId, message: &str) {
        if !self.is_current(run) {
            return;
        }
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.abandon_with_message(format!("{} {} failed: {}", "x".red(), agent, message));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl PipelineObserver for SimpleProgress {
    fn on_run_start(&self, _run: RunId, total: usize) {
        println!("{} {} agents scheduled", "->".cyan(), total);
    }

    fn on_agent_start(&self, _run: RunId, index: usize, total: usize, persona: &Persona) {
        println!(
            "{} [{}/{}] {} is working...",
            "->".cyan(),
            index + 1,
            total,
            persona.name.bold()
        );
    }

    fn on_retry(&self, _run: RunId, persona: &Persona, attempt: u32, max_attempts: u32) {
        println!(
            "   {} rate limited, retry {}/{}",
            persona.name,
            attempt,
            max_attempts
        );
    }

    fn on_agent_complete(
        &self,
        _run: RunId,
        persona: &Persona,
        batch_len: usize,
        progress: &RunProgress,
        _timeline: &Timeline,
    ) {
        println!(
            "  {} {} ({} comments, {}%)",
            "v".green(),
            persona.name,
            batch_len,
            progress.percent()
        );
    }

    fn on_run_complete(&self, _run: RunId) {
        println!("{}", "All agents finished!".green());
    }

    fn on_run_failed(&self, _run: RunId, agent: AgentId, message: &str) {
        println!("  {} {} failed: {}", "x".red(), agent, message);
    }
}
