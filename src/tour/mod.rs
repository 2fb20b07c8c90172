//! Guided walkthrough of the DataFrame API.
//!
//! The tour runs a fixed list of [`Step`]s in order. The first half works on a
//! five-row literal dataset, the second half on the forest-fire observations,
//! and the last steps answer the same questions with the eager [`LocalFrame`]
//! before stopping the session.
//!
//! [`LocalFrame`]: crate::local::LocalFrame

mod steps;

use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use polars::prelude::PolarsError;
use serde_json::{json, Value as JsonValue};

use crate::config::SessionConfig;
use crate::dataframe::DataFrame;
use crate::error::EngineError;
use crate::fires;
use crate::session::SparkSession;

/// Column names of the literal dataset.
pub const LITERAL_COLUMNS: [&str; 4] = ["color", "count", "number", "valid"];

/// The literal dataset: (color, count, number, valid).
pub fn literal_rows() -> Vec<Vec<JsonValue>> {
    vec![
        vec![json!("red"), json!(1), json!(1), json!(true)],
        vec![json!("blue"), json!(2), json!(3), json!(false)],
        vec![json!("green"), json!(5), json!(7), json!(true)],
        vec![json!("red"), json!(4), json!(2), json!(false)],
        vec![json!("blue"), json!(3), json!(9), json!(true)],
    ]
}

/// Build the literal dataset in `spark`.
pub fn literal_dataset(spark: &SparkSession) -> Result<DataFrame, PolarsError> {
    spark.create_dataframe(literal_rows(), &LITERAL_COLUMNS)
}

type StepFn = fn(&mut TourContext, &mut dyn Write) -> Result<(), EngineError>;

/// One stage of the walkthrough.
#[derive(Clone, Copy)]
pub struct Step {
    pub name: &'static str,
    pub title: &'static str,
    /// Whether the step reads the fire data file.
    pub needs_data: bool,
    run: StepFn,
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("needs_data", &self.needs_data)
            .finish()
    }
}

const STEPS: [Step; 12] = [
    Step {
        name: "session",
        title: "Start a session",
        needs_data: false,
        run: steps::session,
    },
    Step {
        name: "literal",
        title: "Build a DataFrame from literal rows",
        needs_data: false,
        run: steps::literal,
    },
    Step {
        name: "select",
        title: "Select columns",
        needs_data: false,
        run: steps::select,
    },
    Step {
        name: "column-type-error",
        title: "A column is not a DataFrame",
        needs_data: false,
        run: steps::column_type_error,
    },
    Step {
        name: "filter",
        title: "Filter rows",
        needs_data: false,
        run: steps::filter,
    },
    Step {
        name: "group-by",
        title: "Group and aggregate",
        needs_data: false,
        run: steps::group_by,
    },
    Step {
        name: "fires-load",
        title: "Load the forest-fire observations",
        needs_data: true,
        run: steps::fires_load,
    },
    Step {
        name: "fires-describe",
        title: "Summary statistics for the weather columns",
        needs_data: true,
        run: steps::fires_describe,
    },
    Step {
        name: "fires-aggregate",
        title: "Burned area by month and fires by day",
        needs_data: true,
        run: steps::fires_aggregate,
    },
    Step {
        name: "fires-correlation",
        title: "Does temperature track burned area?",
        needs_data: true,
        run: steps::fires_correlation,
    },
    Step {
        name: "local-compare",
        title: "The same questions with an in-memory DataFrame",
        needs_data: true,
        run: steps::local_compare,
    },
    Step {
        name: "stop",
        title: "Stop the session",
        needs_data: false,
        run: steps::stop,
    },
];

/// What a tour run did.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TourSummary {
    pub ran: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
}

/// State shared across steps. Session and frames are created on first use so
/// any subset of steps can run on its own.
pub(crate) struct TourContext {
    config: SessionConfig,
    data_path: PathBuf,
    session: Option<SparkSession>,
    literal: Option<DataFrame>,
    fires: Option<DataFrame>,
}

impl TourContext {
    pub(crate) fn spark(&mut self) -> SparkSession {
        match &self.session {
            Some(s) if !s.is_stopped() => s.clone(),
            _ => {
                let s = SparkSession::from_config(&self.config);
                self.session = Some(s.clone());
                s
            }
        }
    }

    pub(crate) fn literal(&mut self) -> Result<DataFrame, PolarsError> {
        if let Some(df) = &self.literal {
            return Ok(df.clone());
        }
        let df = literal_dataset(&self.spark())?;
        self.literal = Some(df.clone());
        Ok(df)
    }

    pub(crate) fn fires(&mut self) -> Result<DataFrame, PolarsError> {
        if let Some(df) = &self.fires {
            return Ok(df.clone());
        }
        let spark = self.spark();
        let df = fires::load(&spark, &self.data_path)?;
        self.fires = Some(df.clone());
        Ok(df)
    }

    pub(crate) fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub(crate) fn truncate(&self) -> bool {
        self.config.truncate
    }

    /// Stop the current session (if any) and forget frames built on it.
    pub(crate) fn stop(&mut self) -> Option<SparkSession> {
        let session = self.session.take();
        if let Some(s) = &session {
            s.stop();
        }
        self.literal = None;
        self.fires = None;
        session
    }
}

/// Runner for the walkthrough.
pub struct Tour {
    ctx: TourContext,
}

impl Tour {
    pub fn new(config: SessionConfig, data_path: impl Into<PathBuf>) -> Self {
        Tour {
            ctx: TourContext {
                config,
                data_path: data_path.into(),
                session: None,
                literal: None,
                fires: None,
            },
        }
    }

    /// All steps in the order they run.
    pub fn list() -> &'static [Step] {
        &STEPS
    }

    /// Run every step in order. Stops at the first failing step.
    pub fn run_all(&mut self, out: &mut impl Write) -> Result<TourSummary, EngineError> {
        let all: Vec<Step> = STEPS.to_vec();
        self.run_steps(&all, out)
    }

    /// Run the named steps in the given order.
    pub fn run_only(
        &mut self,
        names: &[&str],
        out: &mut impl Write,
    ) -> Result<TourSummary, EngineError> {
        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            let step = STEPS.iter().find(|s| s.name == *name).ok_or_else(|| {
                let available: Vec<&str> = STEPS.iter().map(|s| s.name).collect();
                EngineError::NotFound(format!(
                    "unknown step '{}'; available steps: {}",
                    name,
                    available.join(", ")
                ))
            })?;
            selected.push(*step);
        }
        self.run_steps(&selected, out)
    }

    fn run_steps(
        &mut self,
        steps: &[Step],
        out: &mut impl Write,
    ) -> Result<TourSummary, EngineError> {
        let mut summary = TourSummary::default();
        let data_present = self.ctx.data_path.exists();
        if !data_present && steps.iter().any(|s| s.needs_data) {
            warn!(
                "data file {} not found; fire steps will be skipped",
                self.ctx.data_path.display()
            );
        }
        for (i, step) in steps.iter().enumerate() {
            writeln!(out, "== {}. {} [{}] ==", i + 1, step.title, step.name)?;
            if step.needs_data && !data_present {
                writeln!(
                    out,
                    "skipped: data file {} not found\n",
                    self.ctx.data_path.display()
                )?;
                summary.skipped.push(step.name);
                continue;
            }
            debug!("running step {}", step.name);
            (step.run)(&mut self.ctx, out).map_err(|e| {
                log::error!("step '{}' failed: {}", step.name, e);
                e
            })?;
            writeln!(out)?;
            summary.ran.push(step.name);
        }
        info!(
            "tour finished: {} step(s) ran, {} skipped",
            summary.ran.len(),
            summary.skipped.len()
        );
        Ok(summary)
    }
}
