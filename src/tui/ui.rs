use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::state::{App, Phase};
use crate::tui::component::Component;
use crate::tui::components::query_input::INPUT_HEIGHT;
use crate::tui::components::result_view::inner_size;
use crate::tui::components::{HelpBar, QueryInput, ResultView, Spinner, TitleBar};
use crate::tui::theme::Theme;

const CREDENTIAL_HINT: &str = "Set API_KEY (or OPENAI_API_KEY) in your environment or a .env file, \
or add api_key under [openai] in ~/.commander/config.toml. \
Use --provider lmstudio for a local server without a key.";

/// Split the screen into title, body and help rows.
fn screen_layout(area: Rect) -> [Rect; 3] {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]).spacing(1);
    layout.areas(area)
}

/// Size of the text area the result viewport gets on a terminal of this size.
pub fn result_area_size(width: u16, height: u16) -> (u16, u16) {
    let [_, body, _] = screen_layout(Rect::new(0, 0, width, height));
    inner_size(body)
}

pub fn draw_ui(frame: &mut Frame, app: &App, theme: &Theme) {
    let [title_area, body_area, help_area] = screen_layout(frame.area());

    TitleBar::new(&app.model_name, &app.status_message, theme).render(frame, title_area);

    match &app.phase {
        Phase::Entering { error } => draw_entering(frame, body_area, app, error.as_deref(), theme),
        Phase::Pending { .. } => draw_pending(frame, body_area, app, theme),
        Phase::Presenting { viewport, .. } => {
            ResultView::new(viewport, theme).render(frame, body_area)
        }
        Phase::Misconfigured { reason } => draw_misconfigured(frame, body_area, reason, theme),
    }

    HelpBar::new(app.phase_kind(), theme).render(frame, help_area);
}

fn draw_entering(frame: &mut Frame, area: Rect, app: &App, error: Option<&str>, theme: &Theme) {
    use Constraint::{Length, Min};
    let [input_area, message_area, _] =
        Layout::vertical([Length(INPUT_HEIGHT), Length(1), Min(0)]).areas(area);

    QueryInput::new(&app.query, theme).render(frame, input_area);

    if let Some(error) = error {
        let line = Line::from(vec![
            Span::styled("error: ", theme.error_style()),
            Span::raw(error),
        ]);
        frame.render_widget(line, message_area);
    }
}

fn draw_pending(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    use Constraint::{Length, Min};
    let [query_area, spinner_area, _] =
        Layout::vertical([Length(1), Length(1), Min(0)]).spacing(1).areas(area);

    let query_line = Line::from(vec![
        Span::styled(theme.prompt, theme.accent_style()),
        Span::styled(app.query.value(), theme.muted_style()),
    ]);
    frame.render_widget(query_line, query_area);

    let label = format!("Waiting for {}", app.model_name);
    Spinner::new(app.spinner_tick, &label, theme).render(frame, spinner_area);
}

fn draw_misconfigured(frame: &mut Frame, area: Rect, reason: &str, theme: &Theme) {
    let text = vec![
        Line::from(Span::styled(reason, theme.error_style())),
        Line::default(),
        Line::from(Span::styled(CREDENTIAL_HINT, theme.muted_style())),
    ];
    let paragraph = Paragraph::new(text)
        .block(
            Block::bordered()
                .border_type(theme.border)
                .border_style(theme.error_style())
                .title(" Configuration needed "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::inference::{Completion, CompletionError};
    use crate::test_support::{app_with_query, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    const WIDTH: u16 = 80;
    const HEIGHT: u16 = 24;

    fn render(app: &App) -> String {
        let theme = Theme::default();
        let backend = TestBackend::new(WIDTH, HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                draw_ui(f, app, &theme);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    fn sized(mut app: App) -> App {
        let (width, height) = result_area_size(WIDTH, HEIGHT);
        update(&mut app, Action::Resize { width, height });
        app
    }

    fn finish(app: &mut App, texts: &[&str]) {
        update(app, Action::Confirm);
        let request_id = app.pending_request().unwrap();
        update(
            app,
            Action::CompletionFinished {
                request_id,
                result: Ok(Completion::from_texts(texts.iter().copied()).unwrap()),
            },
        );
    }

    #[test]
    fn test_result_area_size() {
        // title + gap + body + gap + help, body minus borders
        assert_eq!(result_area_size(80, 24), (78, 18));
        assert_eq!(result_area_size(0, 0), (0, 0));
    }

    #[test]
    fn test_draw_entering() {
        let text = render(&test_app());
        assert!(text.contains("Commander (model: test-model)"));
        assert!(text.contains("enter confirm"));
        assert!(text.contains("esc quit"));
    }

    #[test]
    fn test_draw_entering_with_error() {
        let mut app = app_with_query("list files");
        update(&mut app, Action::Confirm);
        let request_id = app.pending_request().unwrap();
        update(
            &mut app,
            Action::CompletionFinished {
                request_id,
                result: Err(CompletionError::Network("connection refused".into())),
            },
        );
        let text = render(&app);
        assert!(text.contains("error:"));
        assert!(text.contains("connection refused"));
        assert!(text.contains("list files"));
    }

    #[test]
    fn test_draw_pending() {
        let mut app = app_with_query("show disk usage");
        update(&mut app, Action::Confirm);
        let text = render(&app);
        assert!(text.contains("Waiting for test-model"));
        assert!(text.contains("show disk usage"));
        assert!(text.contains("esc cancel"));
    }

    #[test]
    fn test_draw_presenting() {
        let mut app = sized(app_with_query("go to tmp"));
        finish(&mut app, &["cd /tmp"]);
        let text = render(&app);
        assert!(text.contains("Result"));
        assert!(text.contains("cd /tmp"));
        assert!(text.contains("new query"));
    }

    #[test]
    fn test_draw_presenting_multiple_choices() {
        let mut app = sized(app_with_query("two ways"));
        finish(&mut app, &["ls -la", "ls -A"]);
        let text = render(&app);
        assert!(text.contains("ls -la"));
        assert!(text.contains("ls -A"));
    }

    #[test]
    fn test_draw_misconfigured() {
        let app = test_app().misconfigured("no API key configured".to_string());
        let text = render(&app);
        assert!(text.contains("Configuration needed"));
        assert!(text.contains("no API key configured"));
        assert!(text.contains("API_KEY"));
    }

    #[test]
    fn test_draw_tiny_terminal_does_not_panic() {
        let theme = Theme::neon();
        let mut app = test_app();
        update(&mut app, Action::Resize { width: 0, height: 0 });
        for (width, height) in [(1, 1), (2, 5), (10, 2)] {
            let backend = TestBackend::new(width, height);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal.draw(|f| draw_ui(f, &app, &theme)).unwrap();
        }
    }
}
