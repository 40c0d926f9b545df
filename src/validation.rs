//! Structural validation of encoded problems.
//!
//! Checks the invariants a temporal planner relies on before a problem is
//! handed over. Detects:
//! - Inverted duration bounds
//! - Empty or inverted time windows
//! - Dangling entity handles
//! - Guards naming unknown variables or options
//! - Goal groups whose alternatives do not share the group's slot
//! - Selection variables out of step with their goal episodes
//!
//! Problems built by the encoder from a validated configuration always
//! pass; the checks matter for problems that were deserialized or
//! assembled by hand.

use std::collections::HashSet;

use chrono::TimeDelta;

use crate::models::{GoalGroup, Guard, Problem};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// An episode's minimum duration exceeds its maximum.
    InvertedBounds,
    /// A time window does not end after it starts.
    EmptyTimeWindow,
    /// A handle points outside its registry.
    DanglingReference,
    /// A guard names an unknown variable or option.
    InvalidGuard,
    /// A goal group has no alternatives.
    EmptyGoalGroup,
    /// A goal episode does not run from the group's entry to its exit.
    MisalignedGoalEpisode,
    /// The selection variable is missing or its options do not match the
    /// goal episodes one-to-one.
    SelectionMismatch,
    /// Two decision variables share a name.
    DuplicateName,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the structure of a problem.
///
/// Checks:
/// 1. Every episode has `min_duration ≤ max_duration` when both are set
/// 2. Episode endpoints and locations exist, and every time window ends
///    after it starts
/// 3. Every guard (on episodes, variables, goal groups) names an existing
///    variable and one of its options
/// 4. Decision variable names are unique
/// 5. Every goal group is non-empty and its episodes share (entry, exit)
/// 6. Every goal group's selection variable exists, has one option per
///    goal episode, and guards each goal episode
/// 7. Agents reference existing events, locations, and goal groups
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &Problem) -> ValidationResult {
    let mut errors = Vec::new();

    for episode in problem.episodes() {
        if !episode.has_ordered_bounds() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedBounds,
                format!(
                    "{}: min duration {:?} exceeds max duration {:?}",
                    episode.id, episode.min_duration, episode.max_duration
                ),
            ));
        }

        for event in [episode.start, episode.end] {
            if problem.get_event(event).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingReference,
                    format!("{} references unknown {}", episode.id, event),
                ));
            }
        }

        for location in [episode.start_location, episode.end_location]
            .into_iter()
            .flatten()
        {
            if problem.get_location(location).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingReference,
                    format!("{} references unknown {}", episode.id, location),
                ));
            }
        }

        for window in &episode.time_windows {
            if window.duration() <= TimeDelta::zero() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyTimeWindow,
                    format!(
                        "{}: time window {} → {} is empty",
                        episode.id, window.start, window.end
                    ),
                ));
            }
        }

        for guard in &episode.guards {
            check_guard(problem, guard, &episode.id.to_string(), &mut errors);
        }
    }

    let mut variable_names = HashSet::new();
    for variable in problem.decision_variables() {
        if !variable_names.insert(variable.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate decision variable name: {}", variable.name),
            ));
        }
        for guard in &variable.guards {
            check_guard(problem, guard, &variable.name, &mut errors);
        }
    }

    for group in problem.goal_groups() {
        check_goal_group(problem, group, &mut errors);
    }

    for agent in problem.agents() {
        let events_ok =
            problem.get_event(agent.start).is_some() && problem.get_event(agent.end).is_some();
        let locations_ok = problem.get_location(agent.origin).is_some()
            && problem.get_location(agent.destination).is_some();
        if !events_ok || !locations_ok {
            errors.push(ValidationError::new(
                ValidationErrorKind::DanglingReference,
                format!("{} references unknown events or locations", agent.id),
            ));
        }
        for group in &agent.goal_groups {
            if problem.get_goal_group(*group).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingReference,
                    format!("{} references unknown {}", agent.id, group),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_guard(problem: &Problem, guard: &Guard, owner: &str, errors: &mut Vec<ValidationError>) {
    match problem.get_variable(guard.variable) {
        None => errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGuard,
            format!("'{owner}' is guarded by unknown {}", guard.variable),
        )),
        Some(variable) if !variable.domain.contains_key(&guard.value) => {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidGuard,
                format!(
                    "'{owner}' is guarded by '{}' = '{}', which is not an option",
                    variable.name, guard.value
                ),
            ))
        }
        Some(_) => {}
    }
}

fn check_goal_group(
    problem: &Problem,
    group: &GoalGroup,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(guard) = &group.guard {
        check_guard(problem, guard, &group.name, errors);
    }

    if group.goal_episodes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyGoalGroup,
            format!("Goal group '{}' has no goal episodes", group.name),
        ));
        return;
    }

    let mut episodes = Vec::with_capacity(group.goal_episodes.len());
    for id in &group.goal_episodes {
        match problem.get_episode(*id) {
            Some(episode) => episodes.push(episode),
            None => errors.push(ValidationError::new(
                ValidationErrorKind::DanglingReference,
                format!("Goal group '{}' references unknown {}", group.name, id),
            )),
        }
    }

    for episode in &episodes {
        if episode.endpoints() != (group.start, group.end) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MisalignedGoalEpisode,
                format!(
                    "Goal group '{}': {} runs {} → {}, expected {} → {}",
                    group.name, episode.id, episode.start, episode.end, group.start, group.end
                ),
            ));
        }
    }

    let Some(selection) = group.selection_variable.and_then(|v| problem.get_variable(v)) else {
        errors.push(ValidationError::new(
            ValidationErrorKind::SelectionMismatch,
            format!("Goal group '{}' has no valid selection variable", group.name),
        ));
        return;
    };

    if selection.option_count() != group.alternative_count() {
        errors.push(ValidationError::new(
            ValidationErrorKind::SelectionMismatch,
            format!(
                "Goal group '{}': {} options for {} goal episodes",
                group.name,
                selection.option_count(),
                group.alternative_count()
            ),
        ));
    }

    for episode in &episodes {
        if !episode.guards.iter().any(|g| g.variable == selection.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelectionMismatch,
                format!(
                    "Goal group '{}': {} is not selected by '{}'",
                    group.name, episode.id, selection.name
                ),
            ));
        }
    }
}
