//! Terminal driver: walks the onboarding flow over line-oriented I/O.
//!
//! Any other line, blank or whitespace included, sets the field of the
//! current step as typed. Commands:
//! `/next`, `/back`, `/pick <path>`, `/finish`, `/quit`.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{FlowError, Result};
use crate::onboarding::{OnboardingFlow, OnboardingStep};
use crate::picture::FilePicker;

/// Width of the rendered progress bar, in cells.
const BAR_WIDTH: usize = 20;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the current step's text field.
    Input(String),
    Next,
    Back,
    /// Load a picture from a path; an empty path cancels.
    Pick(String),
    Finish,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let Some(rest) = line.trim().strip_prefix('/') else {
            return Self::Input(line.to_string());
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        match name {
            "next" => Self::Next,
            "back" => Self::Back,
            "pick" => Self::Pick(arg.to_string()),
            "finish" => Self::Finish,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(name.to_string()),
        }
    }
}

/// What happened during a terminal session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Number of profiles written.
    pub completed: usize,
}

/// Heading shown for each step.
pub fn step_prompt(step: OnboardingStep) -> &'static str {
    match step {
        OnboardingStep::PhoneNumber => "What's your phone number?",
        OnboardingStep::FirstName => "What's your first name?",
        OnboardingStep::ProfilePicture => "Select a profile picture (/pick <path>), then /finish",
    }
}

/// Render a text progress bar for the current step.
pub fn progress_bar(flow: &OnboardingFlow) -> String {
    let filled = (flow.progress() * BAR_WIDTH as f32).round() as usize;
    format!(
        "[{}{}] step {}/{}",
        "=".repeat(filled),
        " ".repeat(BAR_WIDTH - filled),
        flow.step().index() + 1,
        OnboardingStep::COUNT
    )
}

/// Run the flow until EOF or `/quit`.
pub async fn run<R, W>(
    flow: &mut OnboardingFlow,
    input: R,
    mut output: W,
) -> Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = SessionSummary::default();
    let mut lines = input.lines();

    write_screen(&mut output, flow).await?;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break, // EOF
            Err(e) => {
                tracing::error!("Error reading input: {}", e);
                return Err(e.into());
            }
        };
        let message = match Command::parse(&line) {
            Command::Quit => break,
            Command::Input(text) => set_field(flow, text),
            Command::Next => flow.advance().map(|_| None),
            Command::Back => {
                flow.back();
                Ok(None)
            }
            Command::Pick(path) => match flow.pick_picture(&FilePicker::new(path)).await {
                Ok(true) => Ok(flow.picture().map(|p| {
                    let (w, h) = p.dimensions();
                    format!("Picture selected ({w}x{h})")
                })),
                Ok(false) => Ok(Some("Picture selection cancelled".to_string())),
                Err(e) => Err(e),
            },
            Command::Finish => flow.finish().await.map(|record| {
                summary.completed += 1;
                Some(format!("Welcome, {}! Profile saved.", record.first_name))
            }),
            Command::Unknown(name) => Ok(Some(format!("Unknown command: /{name}"))),
        };

        match message {
            Ok(Some(text)) => output.write_all(format!("{text}\n").as_bytes()).await?,
            Ok(None) => {}
            Err(e) => output.write_all(format!("! {e}\n").as_bytes()).await?,
        }
        write_screen(&mut output, flow).await?;
    }

    output.flush().await?;
    Ok(summary)
}

fn set_field(
    flow: &mut OnboardingFlow,
    text: String,
) -> std::result::Result<Option<String>, FlowError> {
    match flow.step() {
        OnboardingStep::PhoneNumber => flow.set_phone_number(text)?,
        OnboardingStep::FirstName => flow.set_first_name(text)?,
        OnboardingStep::ProfilePicture => {
            return Ok(Some("Use /pick <path> to choose a picture".to_string()));
        }
    }
    Ok(None)
}

async fn write_screen<W: AsyncWrite + Unpin>(
    output: &mut W,
    flow: &OnboardingFlow,
) -> std::io::Result<()> {
    let back_hint = if flow.can_go_back() { "  (/back)" } else { "" };
    let screen = format!(
        "{}{}\n{}\n> ",
        progress_bar(flow),
        back_hint,
        step_prompt(flow.step())
    );
    output.write_all(screen.as_bytes()).await?;
    output.flush().await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use image::{DynamicImage, ImageFormat};

    use super::*;
    use crate::store::LibSqlBackend;

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("5551234567"), Command::Input("5551234567".into()));
        assert_eq!(Command::parse("  Ana  "), Command::Input("  Ana  ".into()));
        assert_eq!(Command::parse(""), Command::Input(String::new()));
        assert_eq!(Command::parse("  /next "), Command::Next);
        assert_eq!(Command::parse("/next"), Command::Next);
        assert_eq!(Command::parse("/back"), Command::Back);
        assert_eq!(Command::parse("/finish"), Command::Finish);
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(Command::parse("/exit"), Command::Quit);
        assert_eq!(
            Command::parse("/pick  /tmp/me.png "),
            Command::Pick("/tmp/me.png".into())
        );
        assert_eq!(Command::parse("/pick"), Command::Pick(String::new()));
        assert_eq!(Command::parse("/dance"), Command::Unknown("dance".into()));
    }

    #[tokio::test]
    async fn progress_bar_tracks_step() {
        let store = Arc::new(LibSqlBackend::new_memory().await.unwrap());
        let mut flow = OnboardingFlow::new(store);
        assert_eq!(progress_bar(&flow), format!("[{}] step 1/3", " ".repeat(20)));

        flow.set_phone_number("5551234567").unwrap();
        flow.advance().unwrap();
        assert_eq!(
            progress_bar(&flow),
            format!("[{}{}] step 2/3", "=".repeat(10), " ".repeat(10))
        );
    }

    #[tokio::test]
    async fn scripted_session_completes_profile() {
        let tmp = tempfile::tempdir().unwrap();
        let picture_path = tmp.path().join("me.png");
        DynamicImage::new_rgb8(4, 4)
            .save_with_format(&picture_path, ImageFormat::Png)
            .unwrap();

        let store = Arc::new(LibSqlBackend::new_memory().await.unwrap());
        let mut flow = OnboardingFlow::new(store.clone());

        let script = format!(
            "555123456\n/next\n5551234567\n/next\nAna\n/next\n/finish\n/pick\n/pick {}\n/finish\n/quit\n",
            picture_path.display()
        );
        let mut out = Vec::new();
        let summary = run(&mut flow, script.as_bytes(), &mut out).await.unwrap();

        assert_eq!(summary.completed, 1);
        assert_eq!(store.count_profiles().await.unwrap(), 1);
        assert_eq!(flow.step(), OnboardingStep::PhoneNumber);

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("exactly 10 digits"));
        assert!(transcript.contains("No profile picture selected"));
        assert!(transcript.contains("Picture selection cancelled"));
        assert!(transcript.contains("Picture selected (4x4)"));
        assert!(transcript.contains("Welcome, Ana!"));
    }

    #[tokio::test]
    async fn eof_ends_session() {
        let store = Arc::new(LibSqlBackend::new_memory().await.unwrap());
        let mut flow = OnboardingFlow::new(store);
        let mut out = Vec::new();
        let summary = run(&mut flow, &b"5551234567\n/next\n"[..], &mut out)
            .await
            .unwrap();
        assert_eq!(summary.completed, 0);
        assert_eq!(flow.step(), OnboardingStep::FirstName);
    }

    #[tokio::test]
    async fn input_lines_are_taken_as_typed() {
        let store = Arc::new(LibSqlBackend::new_memory().await.unwrap());
        let mut flow = OnboardingFlow::new(store);
        let mut out = Vec::new();
        run(&mut flow, &b"5551234567\n/next\n   \n/next\n"[..], &mut out)
            .await
            .unwrap();
        assert_eq!(flow.step(), OnboardingStep::ProfilePicture);
        assert_eq!(flow.first_name(), "   ");
    }

    #[tokio::test]
    async fn blank_line_clears_current_field() {
        let store = Arc::new(LibSqlBackend::new_memory().await.unwrap());
        let mut flow = OnboardingFlow::new(store);
        let mut out = Vec::new();
        run(&mut flow, &b"5551234567\n\n/next\n"[..], &mut out)
            .await
            .unwrap();
        assert!(flow.phone_number().is_empty());
        assert_eq!(flow.step(), OnboardingStep::PhoneNumber);
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("Phone number is empty"));
    }

    /// Writer whose every write fails.
    struct ClosedOutput;

    impl AsyncWrite for ClosedOutput {
        fn poll_write(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            _buf: &[u8],
        ) -> std::task::Poll<std::io::Result<usize>> {
            std::task::Poll::Ready(Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "output closed",
            )))
        }

        fn poll_flush(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }

        fn poll_shutdown(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn output_failure_surfaces_as_io_error() {
        let store = Arc::new(LibSqlBackend::new_memory().await.unwrap());
        let mut flow = OnboardingFlow::new(store);
        let err = run(&mut flow, &b"/quit\n"[..], ClosedOutput)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe));
    }
}
