use std::io::Write;

use serde_json::json;

use crate::error::EngineError;
use crate::fires::{self, WEATHER_COLUMNS};
use crate::functions::{asc, avg, col, count_all, desc, lit_i64};
use crate::local::LocalFrame;
use crate::session::SparkSession;

use super::{TourContext, LITERAL_COLUMNS};

type StepResult = Result<(), EngineError>;

pub(super) fn session(ctx: &mut TourContext, out: &mut dyn Write) -> StepResult {
    let spark = ctx.spark();
    writeln!(out, "app name: {}", spark.app_name())?;
    writeln!(out, "master:   {}", spark.master())?;
    let again = SparkSession::builder().get_or_create();
    writeln!(
        out,
        "get_or_create returns the running session: {}",
        again.id() == spark.id()
    )?;
    Ok(())
}

pub(super) fn literal(ctx: &mut TourContext, out: &mut dyn Write) -> StepResult {
    let df = ctx.literal()?;
    write!(out, "{}", df.show_string(None, ctx.truncate())?)?;
    write!(out, "{}", df.print_schema()?)?;
    writeln!(out, "columns: {:?}", df.columns()?)?;
    Ok(())
}

pub(super) fn select(ctx: &mut TourContext, out: &mut dyn Write) -> StepResult {
    let df = ctx.literal()?;
    let picked = df.select(&["color", "count"])?;
    write!(out, "{}", picked.show_string(None, ctx.truncate())?)?;
    Ok(())
}

pub(super) fn column_type_error(ctx: &mut TourContext, out: &mut dyn Write) -> StepResult {
    let df = ctx.literal()?;
    let color = df.column("color")?;
    match color.show() {
        Err(err @ EngineError::Type(_)) => writeln!(out, "{err}")?,
        Err(other) => return Err(other),
        Ok(()) => {
            return Err(EngineError::Internal(
                "showing a column unexpectedly succeeded".to_string(),
            ))
        }
    }
    writeln!(out, "selecting it first works:")?;
    write!(
        out,
        "{}",
        df.select(&["color"])?.show_string(None, ctx.truncate())?
    )?;
    Ok(())
}

pub(super) fn filter(ctx: &mut TourContext, out: &mut dyn Write) -> StepResult {
    let df = ctx.literal()?;
    let over_one = col("count").gt(&lit_i64(1));
    writeln!(out, "where {}:", over_one.name())?;
    write!(
        out,
        "{}",
        df.filter(&over_one)?.show_string(None, ctx.truncate())?
    )?;
    let compound = col("valid").and(&col("number").gt(&lit_i64(2)));
    writeln!(out, "where {}:", compound.name())?;
    write!(
        out,
        "{}",
        df.filter(&compound)?.show_string(None, ctx.truncate())?
    )?;
    Ok(())
}

pub(super) fn group_by(ctx: &mut TourContext, out: &mut dyn Write) -> StepResult {
    let df = ctx.literal()?;
    let averaged = df.group_by(&["color"])?.avg("number")?;
    writeln!(out, "nothing has run yet; the pending plan is:")?;
    writeln!(out, "{}", averaged.explain()?)?;
    write!(out, "{}", averaged.show_string(None, ctx.truncate())?)?;
    Ok(())
}

pub(super) fn fires_load(ctx: &mut TourContext, out: &mut dyn Write) -> StepResult {
    let df = ctx.fires()?;
    writeln!(out, "source: {}", ctx.data_path().display())?;
    write!(out, "{}", df.print_schema()?)?;
    write!(out, "{}", df.show_string(Some(5), ctx.truncate())?)?;
    writeln!(out, "rows: {}", df.count()?)?;
    Ok(())
}

pub(super) fn fires_describe(ctx: &mut TourContext, out: &mut dyn Write) -> StepResult {
    let df = ctx.fires()?;
    let summary = df.describe(&WEATHER_COLUMNS)?;
    write!(out, "{}", summary.show_string(None, ctx.truncate())?)?;
    Ok(())
}

pub(super) fn fires_aggregate(ctx: &mut TourContext, out: &mut dyn Write) -> StepResult {
    let df = ctx.fires()?;
    let by_month = df
        .group_by(&["month"])?
        .agg(&[avg(&col("area")), count_all()])?
        .with_column("month_number", &fires::month_number(&col("month")))?
        .order_by(&[asc("month_number")])?
        .drop(&["month_number"])?;
    writeln!(out, "average burned area by month:")?;
    write!(out, "{}", by_month.show_string(Some(12), ctx.truncate())?)?;

    let by_day = df
        .group_by(&["day"])?
        .count()?
        .order_by(&[desc("count"), asc("day")])?;
    writeln!(out, "fires by day of week:")?;
    write!(out, "{}", by_day.show_string(Some(7), ctx.truncate())?)?;
    Ok(())
}

pub(super) fn fires_correlation(ctx: &mut TourContext, out: &mut dyn Write) -> StepResult {
    let df = ctx.fires()?;
    let r = df.stat().corr("temp", "area")?;
    writeln!(out, "corr(temp, area) = {r:.4}")?;
    let matrix = df.stat().corr_matrix(&["temp", "RH", "wind", "area"])?;
    write!(out, "{}", matrix.show_string(None, ctx.truncate())?)?;
    Ok(())
}

pub(super) fn local_compare(ctx: &mut TourContext, out: &mut dyn Write) -> StepResult {
    let local = LocalFrame::read_csv(ctx.data_path())?;
    let (rows, cols) = local.shape();
    writeln!(out, "shape: ({rows}, {cols})")?;
    writeln!(out, "{}", local.head(5))?;
    writeln!(out, "mean area by month:")?;
    writeln!(out, "{}", local.group_mean("month", "area")?)?;

    let local_r = local.corr("temp", "area")?;
    let spark_r = ctx.fires()?.stat().corr("temp", "area")?;
    let agree = (local_r.is_nan() && spark_r.is_nan()) || (local_r - spark_r).abs() < 1e-9;
    writeln!(
        out,
        "corr(temp, area): local {local_r:.4}, distributed {spark_r:.4}, agree: {agree}"
    )?;
    if !agree {
        return Err(EngineError::Internal(format!(
            "correlation mismatch: local {local_r} vs distributed {spark_r}"
        )));
    }

    let colors = ctx.literal()?.to_local()?.value_counts(LITERAL_COLUMNS[0])?;
    writeln!(out, "literal dataset colors, collected locally:")?;
    writeln!(out, "{colors}")?;
    Ok(())
}

pub(super) fn stop(ctx: &mut TourContext, out: &mut dyn Write) -> StepResult {
    let spark = match ctx.stop() {
        Some(s) => s,
        None => {
            writeln!(out, "no session was running")?;
            return Ok(());
        }
    };
    writeln!(out, "stopped session {}", spark.id())?;
    match spark.create_dataframe(vec![vec![json!(1)]], &["x"]) {
        Err(err) => writeln!(out, "using it now fails: {}", EngineError::from(err))?,
        Ok(_) => {
            return Err(EngineError::Internal(
                "stopped session still built a DataFrame".to_string(),
            ))
        }
    }
    Ok(())
}
