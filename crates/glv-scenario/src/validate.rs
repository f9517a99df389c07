//! Scenario validation logic.

use glv_core::first_non_finite;

use crate::schema::{InteractionsDef, RunDef, Scenario};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Shape mismatch: {field} (expected={expected}, actual={actual})")]
    Shape {
        field: String,
        expected: usize,
        actual: usize,
    },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    let n = scenario.species;
    if n == 0 {
        return Err(invalid("species", "0", "must be positive"));
    }

    check_len("state", n, scenario.state.len())?;
    check_finite("state", &scenario.state)?;
    check_len("rates", n, scenario.rates.len())?;
    check_finite("rates", &scenario.rates)?;

    match &scenario.interactions {
        InteractionsDef::Dense { rows } => {
            check_len("interactions.rows", n, rows.len())?;
            for (i, row) in rows.iter().enumerate() {
                let field = format!("interactions.rows[{i}]");
                check_len(&field, n, row.len())?;
                check_finite(&field, row)?;
            }
        }
        InteractionsDef::Random {
            template,
            self_regulation,
            scale,
            ..
        } => {
            check_len("interactions.template", n, template.len())?;
            for (i, row) in template.iter().enumerate() {
                check_len(&format!("interactions.template[{i}]"), n, row.len())?;
            }
            for (field, value) in [
                ("interactions.self_regulation", *self_regulation),
                ("interactions.scale", *scale),
            ] {
                if !value.is_finite() {
                    return Err(invalid(field, &value.to_string(), "must be finite"));
                }
            }
        }
    }

    validate_run(&scenario.run)
}

fn validate_run(run: &RunDef) -> Result<(), ValidationError> {
    if !run.dt.is_finite() || run.dt == 0.0 {
        return Err(invalid(
            "run.dt",
            &run.dt.to_string(),
            "must be finite and non-zero",
        ));
    }
    if !run.t_end.is_finite() {
        return Err(invalid("run.t_end", &run.t_end.to_string(), "must be finite"));
    }
    if run.record_every == 0 {
        return Err(invalid("run.record_every", "0", "must be positive"));
    }
    Ok(())
}

fn invalid(field: &str, value: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn check_len(field: &str, expected: usize, actual: usize) -> Result<(), ValidationError> {
    if expected != actual {
        return Err(ValidationError::Shape {
            field: field.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_finite(field: &str, values: &[f64]) -> Result<(), ValidationError> {
    match first_non_finite(values) {
        Some((index, value)) => Err(invalid(
            &format!("{field}[{index}]"),
            &value.to_string(),
            "must be finite",
        )),
        None => Ok(()),
    }
}
