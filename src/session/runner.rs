//! Interactive set logging.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};

use crate::archive::{
    format_number, generate_workout_id, is_known_set_type, SetArchive, SetInput, SetRecord,
    DEFAULT_SET_TYPE,
};
use crate::catalog::{Movement, MovementDraft, MovementStore};
use crate::error::{LiftlogError, Result};
use crate::ui::{Prompt, PromptOption, UserInterface};

use super::state::{is_stop_word, NextAction, SessionState};

/// Settings for a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Continue this workout instead of starting a new one.
    pub workout_id: Option<String>,
    /// Date recorded on every set; today when absent.
    pub date: Option<NaiveDate>,
    /// Top of the RPE scale.
    pub rpe_max: f64,
    /// Unit offered when a movement has no default unit.
    pub default_unit: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            workout_id: None,
            date: None,
            rpe_max: 10.0,
            default_unit: "kg".to_string(),
        }
    }
}

/// What a finished session logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub workout_id: String,
    pub sets_logged: usize,
    /// Movement ids in the order they were first logged.
    pub movements: Vec<String>,
}

/// Values offered as defaults for the next set of a movement.
#[derive(Debug, Clone, Default)]
struct CarriedFields {
    reps: String,
    load: String,
    unit: String,
    set_type: String,
}

/// A logging session for one workout.
///
/// Runs the loop described by [`SessionState`]: pick a movement, log its
/// sets, then repeat, switch movement or stop. End of input stops the loop
/// cleanly at any prompt.
pub struct Session<'a> {
    catalog: &'a MovementStore,
    archive: &'a SetArchive,
    workout_id: String,
    date: NaiveDate,
    rpe_max: f64,
    default_unit: String,
    set_numbers: HashMap<String, u32>,
    carried: HashMap<String, CarriedFields>,
    summary: SessionSummary,
}

impl<'a> Session<'a> {
    /// Create a session over the given stores.
    pub fn new(catalog: &'a MovementStore, archive: &'a SetArchive, options: SessionOptions) -> Self {
        let workout_id = options
            .workout_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(generate_workout_id);

        Self {
            catalog,
            archive,
            summary: SessionSummary {
                workout_id: workout_id.clone(),
                sets_logged: 0,
                movements: Vec::new(),
            },
            workout_id,
            date: options.date.unwrap_or_else(|| Local::now().date_naive()),
            rpe_max: options.rpe_max,
            default_unit: options.default_unit,
            set_numbers: HashMap::new(),
            carried: HashMap::new(),
        }
    }

    /// Get the workout id sets are logged under.
    pub fn workout_id(&self) -> &str {
        &self.workout_id
    }

    /// Run the loop until the user stops or input ends.
    pub fn run(&mut self, ui: &mut dyn UserInterface) -> Result<SessionSummary> {
        ui.show_header(&format!("Workout {}", self.workout_id));
        if self.archive.exists() {
            let earlier = self.archive.list_for_workout(&self.workout_id)?;
            if !earlier.is_empty() {
                ui.message(&format!(
                    "Continuing workout {} ({} sets already logged)",
                    self.workout_id,
                    earlier.len()
                ));
            }
        }

        let mut state = SessionState::AwaitingMovement;
        while !state.is_done() {
            tracing::debug!("Session state: {:?}", state);
            let step = match state {
                SessionState::AwaitingMovement => self.choose_movement(ui),
                SessionState::AwaitingSetFields(movement) => self.log_set(ui, movement),
                SessionState::ConfirmOrRepeat(movement) => self.next_action(ui, movement),
                SessionState::Done => Ok(SessionState::Done),
            };
            state = match step {
                Ok(next) => next,
                Err(LiftlogError::InputClosed) => {
                    tracing::debug!("Input closed, ending session");
                    SessionState::Done
                }
                Err(e) => return Err(e),
            };
        }

        Ok(self.summary.clone())
    }

    fn choose_movement(&mut self, ui: &mut dyn UserInterface) -> Result<SessionState> {
        let answer = ui
            .prompt(&Prompt::input(
                "movement",
                "Movement (id or name, blank to finish)",
            ))?
            .as_string();
        if is_stop_word(&answer) {
            return Ok(SessionState::Done);
        }
        let query = answer.trim();

        let movements = self.catalog.list()?;
        if let Some(exact) = movements
            .iter()
            .find(|m| m.id == query || m.name.eq_ignore_ascii_case(query))
        {
            return Ok(SessionState::AwaitingSetFields(exact.clone()));
        }

        let matches: Vec<&Movement> = movements.iter().filter(|m| m.matches(query)).collect();
        match matches.as_slice() {
            [] => self.offer_to_create(ui, query),
            [only] => {
                ui.message(&format!("Using {} ({})", only.name, only.id));
                Ok(SessionState::AwaitingSetFields((*only).clone()))
            }
            several => {
                let mut options: Vec<PromptOption> = several
                    .iter()
                    .map(|m| PromptOption::new(format!("{} ({})", m.name, m.id), m.id.clone()))
                    .collect();
                options.push(PromptOption::new("None of these", ""));

                let picked = ui
                    .prompt(
                        &Prompt::select(
                            "choose_movement",
                            &format!("'{}' matches {} movements", query, several.len()),
                            options,
                        )
                        .with_default(several[0].id.clone()),
                    )?
                    .as_string();
                Ok(match several.iter().find(|m| m.id == picked) {
                    Some(m) => SessionState::AwaitingSetFields((*m).clone()),
                    None => SessionState::AwaitingMovement,
                })
            }
        }
    }

    fn offer_to_create(&mut self, ui: &mut dyn UserInterface, name: &str) -> Result<SessionState> {
        let create = ui
            .prompt(
                &Prompt::confirm(
                    "create_movement",
                    &format!("'{}' is not in the catalog. Add it?", name),
                )
                .with_default("no"),
            )?
            .as_bool()
            .unwrap_or(false);
        if !create {
            ui.warning(&format!("Unknown movement '{}'", name));
            return Ok(SessionState::AwaitingMovement);
        }

        match self.catalog.add(MovementDraft::named(name), false) {
            Ok(outcome) => {
                ui.success(&format!("Added movement {}", outcome.movement.id));
                Ok(SessionState::AwaitingSetFields(outcome.movement))
            }
            Err(e @ (LiftlogError::Validation { .. } | LiftlogError::DuplicateMovement { .. })) => {
                ui.error(&e.to_string());
                Ok(SessionState::AwaitingMovement)
            }
            Err(e) => Err(e),
        }
    }

    fn next_set_number(&mut self, movement_id: &str) -> Result<u32> {
        if let Some(last) = self.set_numbers.get(movement_id) {
            return Ok(last + 1);
        }
        let last = self.archive.last_set_number(&self.workout_id, movement_id)?;
        self.set_numbers.insert(movement_id.to_string(), last);
        Ok(last + 1)
    }

    fn carried_for(&self, movement: &Movement) -> CarriedFields {
        self.carried.get(&movement.id).cloned().unwrap_or_else(|| {
            let unit = if movement.default_unit.is_empty() {
                self.default_unit.clone()
            } else {
                movement.default_unit.clone()
            };
            CarriedFields {
                unit,
                set_type: DEFAULT_SET_TYPE.to_string(),
                ..Default::default()
            }
        })
    }

    fn log_set(&mut self, ui: &mut dyn UserInterface, movement: Movement) -> Result<SessionState> {
        let set_number = self.next_set_number(&movement.id)?;
        let carried = self.carried_for(&movement);

        let mut form = SetForm::default();
        for field in SET_FIELDS {
            form.ask(ui, field, &movement, set_number, &carried)?;
        }

        let set = loop {
            let input = SetInput {
                workout_id: Some(self.workout_id.clone()),
                date: Some(self.date.format("%Y-%m-%d").to_string()),
                movement_id: movement.id.clone(),
                ..form.to_input()
            };
            match input.validate(Local::now().naive_local(), self.rpe_max) {
                Ok(set) => break set,
                Err(LiftlogError::Validation { errors }) => {
                    let retry: Vec<&'static str> = SET_FIELDS
                        .into_iter()
                        .filter(|field| errors.iter().any(|e| e.field == *field))
                        .collect();
                    let err = LiftlogError::Validation { errors };
                    if retry.is_empty() {
                        return Err(err);
                    }
                    ui.error(&err.to_string());
                    for field in retry {
                        form.ask(ui, field, &movement, set_number, &carried)?;
                    }
                }
                Err(e) => return Err(e),
            }
        };
        if !is_known_set_type(&set.set_type) {
            ui.warning(&format!("Unrecognized set type '{}'", set.set_type));
        }

        let record = self.archive.append(self.catalog, set)?;
        self.remember(&record);
        ui.success(&format!(
            "Logged {} set {}: {}",
            record.movement_name,
            record.set_number,
            describe(&record)
        ));
        Ok(SessionState::ConfirmOrRepeat(movement))
    }

    fn remember(&mut self, record: &SetRecord) {
        let last = self
            .set_numbers
            .entry(record.movement_id.clone())
            .or_insert(0);
        *last = (*last).max(record.set_number);

        self.carried.insert(
            record.movement_id.clone(),
            CarriedFields {
                reps: record.reps.map(|r| r.to_string()).unwrap_or_default(),
                load: record.load.map(format_number).unwrap_or_default(),
                unit: record.unit.clone(),
                set_type: record.set_type.clone(),
            },
        );

        self.summary.sets_logged += 1;
        if !self.summary.movements.contains(&record.movement_id) {
            self.summary.movements.push(record.movement_id.clone());
        }
    }

    fn next_action(&mut self, ui: &mut dyn UserInterface, movement: Movement) -> Result<SessionState> {
        let options = NextAction::ALL
            .iter()
            .map(|a| PromptOption::new(a.label(&movement), a.as_str()))
            .collect();
        let answer = ui
            .prompt(
                &Prompt::select("next_action", "What next?", options)
                    .with_default(NextAction::Same.as_str()),
            )?
            .as_string();

        Ok(match answer.parse::<NextAction>() {
            Ok(NextAction::Same) => SessionState::AwaitingSetFields(movement),
            Ok(NextAction::New) => SessionState::AwaitingMovement,
            Ok(NextAction::Done) => SessionState::Done,
            Err(e) => {
                ui.warning(&e);
                SessionState::ConfirmOrRepeat(movement)
            }
        })
    }
}

/// Set fields prompted for, in prompt order.
const SET_FIELDS: [&str; 8] = [
    "set_number",
    "reps",
    "load",
    "unit",
    "set_type",
    "rpe",
    "rest_seconds",
    "notes",
];

/// Answers typed for one set. Valid answers survive a failed validation.
#[derive(Debug, Default)]
struct SetForm {
    answers: HashMap<&'static str, String>,
}

impl SetForm {
    fn ask(
        &mut self,
        ui: &mut dyn UserInterface,
        field: &'static str,
        movement: &Movement,
        set_number: u32,
        carried: &CarriedFields,
    ) -> Result<()> {
        let (question, default) = match field {
            "set_number" => (
                format!("{}: set number", movement.name),
                set_number.to_string(),
            ),
            "reps" => ("Reps (number or AMRAP)".to_string(), carried.reps.clone()),
            "load" => ("Load".to_string(), carried.load.clone()),
            "unit" => ("Unit".to_string(), carried.unit.clone()),
            "set_type" => ("Set type".to_string(), carried.set_type.clone()),
            "rpe" => ("RPE (blank to skip)".to_string(), String::new()),
            "rest_seconds" => ("Rest seconds (blank to skip)".to_string(), String::new()),
            _ => ("Notes (blank to skip)".to_string(), String::new()),
        };
        let answer = ask(ui, field, &question, &default)?;
        self.answers.insert(field, answer);
        Ok(())
    }

    fn answer(&self, field: &str) -> Option<String> {
        self.answers.get(field).cloned()
    }

    fn to_input(&self) -> SetInput {
        SetInput {
            set_number: self.answer("set_number").unwrap_or_default(),
            reps: self.answer("reps"),
            load: self.answer("load"),
            unit: self.answer("unit"),
            set_type: self.answer("set_type"),
            rpe: self.answer("rpe"),
            rest_seconds: self.answer("rest_seconds"),
            notes: self.answer("notes"),
            ..Default::default()
        }
    }
}

/// Ask a free-text question; an empty `default` means none.
fn ask(ui: &mut dyn UserInterface, key: &str, question: &str, default: &str) -> Result<String> {
    let mut prompt = Prompt::input(key, question);
    if !default.is_empty() {
        prompt = prompt.with_default(default);
    }
    Ok(ui.prompt(&prompt)?.as_string())
}

/// Short description of a set, e.g. `5 x 100 kg`.
fn describe(record: &SetRecord) -> String {
    let reps = record
        .reps
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());
    match record.load {
        Some(load) => format!("{} x {} {}", reps, format_number(load), record.unit)
            .trim_end()
            .to_string(),
        None => format!("{} reps", reps),
    }
}
