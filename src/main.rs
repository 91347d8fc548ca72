use std::sync::Arc;

use anyhow::{Context, bail};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use clinic_booking::config::Config;
use clinic_booking::services::{AppointmentsService, HttpAppointmentsApi, HttpUserDirectory};
use clinic_booking::workflow::{CreateAppointment, PatientAppointments, SubmitOutcome};

const USAGE: &str = "usage: clinic-booking doctors
       clinic-booking list
       clinic-booking create <DD/MM/YYYY> <HH:MM> <doctor-id> [notes]
       clinic-booking cancel <appointment-id>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cfg = Config::from_env()?;
    let appointments = Arc::new(HttpAppointmentsApi::from_config(&cfg));
    let directory = Arc::new(HttpUserDirectory::from_config(&cfg));

    tracing::info!("Using backend at {}", cfg.api_base_url);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["doctors"] => {
            let wf = CreateAppointment::new(appointments, directory, cfg.actor());
            wf.activate().await;
            let state = wf.state();
            if !state.error.is_empty() {
                bail!(state.error);
            }
            print_json(&state.doctors)
        }
        ["list"] => {
            let actor = cfg.actor().context("SESSION_USER_ID is not set")?;
            let dash = PatientAppointments::new(appointments, Some(actor));
            dash.load().await?;
            print_json(&dash.state().appointments)
        }
        ["create", date, time, doctor_id, notes @ ..] => {
            let wf = CreateAppointment::new(appointments, directory, cfg.actor());
            wf.activate().await;
            if !wf.select_doctor_by_id(doctor_id) {
                let state = wf.state();
                if !state.error.is_empty() {
                    bail!(state.error);
                }
                bail!("unknown doctor id {doctor_id}");
            }
            wf.set_date(*date);
            wf.set_time(*time);
            if !notes.is_empty() {
                wf.set_notes(Some(notes.join(" ")));
            }

            match wf.submit().await? {
                SubmitOutcome::Created(appt) => print_json(&appt),
                SubmitOutcome::Invalid(reason) => bail!(reason),
                SubmitOutcome::Failed => bail!(wf.state().error),
            }
        }
        ["cancel", id] => {
            AppointmentsService::new(appointments)
                .cancel_appointment(id)
                .await?;
            println!("cancelled {id}");
            Ok(())
        }
        _ => bail!(USAGE),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
