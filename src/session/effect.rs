use crate::api::SessionRecord;
use crate::audio::Cue;

/// Side effects requested by the runner, executed by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Play an audible cue
    PlayCue(Cue),
    /// Submit the finished session and report back via `submission_finished`
    SubmitSession(SessionRecord),
    /// Show a blocking error to the user
    ShowError { title: String, message: String },
}
