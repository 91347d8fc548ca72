use tokio::sync::watch;

pub mod create_appointment;
pub mod patient_appointments;

pub use create_appointment::{CreateAppointment, CreateAppointmentState, SubmitOutcome};
pub use patient_appointments::{PatientAppointments, PatientAppointmentsState};

/// Holds a busy flag raised for as long as it lives.
///
/// The flag is lowered on drop, so it is released on every exit path,
/// including the future being dropped mid-request.
pub(crate) struct BusyGuard<'a, S> {
    state: &'a watch::Sender<S>,
    flag: fn(&mut S) -> &mut bool,
}

impl<'a, S> BusyGuard<'a, S> {
    pub(crate) fn raise(state: &'a watch::Sender<S>, flag: fn(&mut S) -> &mut bool) -> Self {
        state.send_modify(|s| *flag(s) = true);
        Self { state, flag }
    }
}

impl<S> Drop for BusyGuard<'_, S> {
    fn drop(&mut self) {
        let flag = self.flag;
        self.state.send_modify(|s| *flag(s) = false);
    }
}
