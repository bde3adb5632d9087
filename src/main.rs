mod app;
mod config;
mod engine;
mod session;
mod stats;
mod store;
mod vocab;

use std::io;

use anyhow::{Result, bail};
use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen, RoundView};
use config::Config;
use engine::spelling::{LetterMark, MAX_ATTEMPTS};
use engine::{GameMode, RoundOutcome, choice};
use stats::StatsTracker;
use store::schema::Statistics;
use vocab::Difficulty;

#[derive(Parser)]
#[command(name = "spellwell", version, about = "Terminal vocabulary trainer with four quiz modes")]
struct Cli {
    #[arg(short, long, help = "Quiz mode (spelling, definition, fillblank, anagram)")]
    mode: Option<String>,

    #[arg(short, long, help = "Difficulty tier (easy, medium, hard)")]
    difficulty: Option<String>,

    #[arg(long, help = "Print aggregate statistics and exit")]
    stats: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.stats {
        let tracker = StatsTracker::new()?;
        print_stats(&tracker.read());
        return Ok(());
    }

    let mut config = Config::load().unwrap_or_default();
    config.normalize();
    let mut app = App::new(config)?;

    let mut autostart = false;
    if let Some(name) = cli.mode.as_deref() {
        match GameMode::parse(name) {
            Some(mode) => {
                app.mode = mode;
                autostart = true;
            }
            None => bail!("unknown mode '{name}'"),
        }
    }
    if let Some(name) = cli.difficulty.as_deref() {
        match Difficulty::parse(name) {
            Some(difficulty) => {
                app.difficulty = difficulty;
                autostart = true;
            }
            None => bail!("unknown difficulty '{name}'"),
        }
    }
    if autostart {
        app.start_session();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn print_stats(stats: &Statistics) {
    println!("rounds played:  {}", stats.total_games_played);
    println!("total score:    {}", stats.total_score);
    println!("best streak:    {}", stats.best_streak);
    for tier in Difficulty::ALL {
        println!(
            "{:<8} correct {:>4}  incorrect {:>4}",
            tier.as_str(),
            stats.correct_by_difficulty.get(tier),
            stats.incorrect_by_difficulty.get(tier),
        );
    }
    for mode in GameMode::ALL {
        println!("{:<12} played {:>4}", mode.as_str(), stats.games_by_mode.get(mode));
    }
    if !stats.incorrect_words.is_empty() {
        println!("missed words:   {}", stats.incorrect_words.join(", "));
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        if let Event::Key(key) = crossterm::event::read()? {
            // Only Press events; Repeat would inflate typed input
            if key.kind == KeyEventKind::Press {
                handle_key(app, key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::DifficultySelect => handle_difficulty_key(app, key),
        AppScreen::Game => handle_game_key(app, key),
        AppScreen::SessionComplete => handle_complete_key(app, key),
        AppScreen::Stats => handle_stats_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.select_mode(GameMode::Spelling),
        KeyCode::Char('2') => app.select_mode(GameMode::Definition),
        KeyCode::Char('3') => app.select_mode(GameMode::FillBlank),
        KeyCode::Char('4') => app.select_mode(GameMode::Anagram),
        KeyCode::Char('s') => app.go_to_stats(),
        KeyCode::Up | KeyCode::Char('k') => app.menu_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu_next(),
        KeyCode::Enter => match app.menu_selected {
            0..=3 => app.select_mode(GameMode::ALL[app.menu_selected]),
            4 => app.go_to_stats(),
            _ => app.should_quit = true,
        },
        _ => {}
    }
}

fn handle_difficulty_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.screen = AppScreen::Menu,
        KeyCode::Char('1') => app.choose_difficulty(Difficulty::Easy),
        KeyCode::Char('2') => app.choose_difficulty(Difficulty::Medium),
        KeyCode::Char('3') => app.choose_difficulty(Difficulty::Hard),
        KeyCode::Up | KeyCode::Char('k') => app.difficulty_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.difficulty_next(),
        KeyCode::Enter => app.choose_difficulty(Difficulty::ALL[app.difficulty_selected]),
        _ => {}
    }
}

fn handle_game_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.end_session(),
        KeyCode::Enter => app.confirm(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Tab => app.reshuffle(),
        KeyCode::Delete => app.clear_answer(),
        KeyCode::F(1) => app.toggle_hint(),
        KeyCode::Char(ch) => app.type_char(ch),
        _ => {}
    }
}

fn handle_complete_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.start_session(),
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => app.end_session(),
        KeyCode::Char('s') => app.go_to_stats(),
        _ => {}
    }
}

fn handle_stats_key(app: &mut App, key: KeyEvent) {
    // Confirmation dialog takes priority
    if app.stats_confirm_reset {
        match key.code {
            KeyCode::Char('y') => app.reset_stats(),
            KeyCode::Char('n') | KeyCode::Esc => app.stats_confirm_reset = false,
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.screen = AppScreen::Menu,
        KeyCode::Char('r') => app.stats_confirm_reset = true,
        _ => {}
    }
}

const HEADER_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Cyan)
    .add_modifier(Modifier::BOLD);
const DIM: Style = Style::new().fg(Color::DarkGray);

fn render(frame: &mut ratatui::Frame, app: &App) {
    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::DifficultySelect => render_difficulty(frame, app),
        AppScreen::Game => render_game(frame, app),
        AppScreen::SessionComplete => render_complete(frame, app),
        AppScreen::Stats => render_stats(frame, app),
    }
}

fn screen_layout(area: Rect) -> (Rect, Rect, Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    (layout[0], layout[1], layout[2])
}

fn render_chrome(frame: &mut ratatui::Frame, title: &str, footer_text: &str) -> Rect {
    let (header_area, body, footer_area) = screen_layout(frame.area());
    let header = Paragraph::new(Line::from(Span::styled(format!(" spellwell | {title} "), HEADER_STYLE)))
        .style(Style::default().bg(Color::Cyan));
    frame.render_widget(header, header_area);
    let footer = Paragraph::new(Line::from(Span::styled(footer_text, DIM)));
    frame.render_widget(footer, footer_area);
    body
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let body = render_chrome(
        frame,
        "pick a game",
        " [1-4] Mode  [s] Stats  [j/k] Move  [Enter] Select  [q] Quit ",
    );

    let mut lines: Vec<Line> = vec![Line::default()];
    let labels: Vec<String> = GameMode::ALL
        .iter()
        .map(|m| m.label().to_string())
        .chain(["Statistics".to_string(), "Quit".to_string()])
        .collect();
    for (i, label) in labels.iter().enumerate() {
        let marker = if i == app.menu_selected { " > " } else { "   " };
        let style = if i == app.menu_selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("{marker}{label}"), style)));
    }
    if let Some(status) = &app.status {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("   {status}"),
            Style::default().fg(Color::Red),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" spellwell ")),
        centered(50, 60, body),
    );
}

fn render_difficulty(frame: &mut ratatui::Frame, app: &App) {
    let body = render_chrome(
        frame,
        app.mode.label(),
        " [1-3] Difficulty  [Enter] Select  [Esc] Back ",
    );
    let mut lines: Vec<Line> = vec![Line::default()];
    for (i, tier) in Difficulty::ALL.iter().enumerate() {
        let marker = if i == app.difficulty_selected { " > " } else { "   " };
        let style = if i == app.difficulty_selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("{marker}{tier}"), style)));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" difficulty ")),
        centered(40, 40, body),
    );
}

fn render_game(frame: &mut ratatui::Frame, app: &App) {
    let Some(session) = &app.session else { return };
    let Some(round) = &app.round else { return };

    let total = app.vocab.words_of(session.difficulty).len();
    let title = format!(
        "{} ({}) | Score {} | Streak {} | {}/{} words",
        session.mode.label(),
        session.difficulty,
        session.score,
        session.streak,
        session.mastered().len(),
        total,
    );
    let footer = match round {
        RoundView::Spelling { .. } => " [a-z] Type  [Enter] Guess  [F1] Hint  [Esc] End session ",
        RoundView::Choice { .. } => " [1-4] Pick an option  [F1] Hint  [Esc] End session ",
        RoundView::Anagram { .. } => {
            " [a-z] Place letter  [Backspace] Undo  [Tab] Shuffle  [Del] Clear  [Enter] Submit  [Esc] End session "
        }
    };
    let body = render_chrome(frame, &title, footer);

    let mut lines: Vec<Line> = vec![Line::default()];
    match round {
        RoundView::Spelling { round, entry } => {
            if app.hint_shown {
                lines.push(Line::from(format!("Definition: {}", round.target().definition)));
            } else {
                lines.push(Line::from(Span::styled("[F1] show definition hint", DIM)));
            }
            lines.push(Line::default());
            for guess in round.guesses() {
                let spans: Vec<Span> = round
                    .classify(guess)
                    .into_iter()
                    .map(|(ch, mark)| {
                        let color = match mark {
                            LetterMark::Correct => Color::Green,
                            LetterMark::Present => Color::Yellow,
                            LetterMark::Absent => Color::DarkGray,
                        };
                        Span::styled(
                            format!(" {} ", ch.to_ascii_uppercase()),
                            Style::default().fg(Color::Black).bg(color),
                        )
                    })
                    .collect();
                lines.push(Line::from(spans));
                lines.push(Line::default());
            }
            if round.outcome().is_none() {
                let mut spans: Vec<Span> = entry
                    .chars()
                    .map(|ch| Span::raw(format!(" {} ", ch.to_ascii_uppercase())))
                    .collect();
                for _ in entry.chars().count()..round.word_length() {
                    spans.push(Span::styled(" _ ", DIM));
                }
                lines.push(Line::from(spans));
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    format!(
                        "{} of {} attempts used",
                        round.guesses().len(),
                        MAX_ATTEMPTS
                    ),
                    DIM,
                )));
            }
            push_result_banner(&mut lines, round.outcome(), &round.target().text);
        }
        RoundView::Choice { round } => {
            let target = round.target();
            match session.mode {
                GameMode::FillBlank => {
                    let sentence = target.example_sentence.as_deref().unwrap_or("");
                    let shown = match round.selected() {
                        Some(i) => choice::fill_sentence(sentence, &round.options()[i].text),
                        None => choice::fill_sentence(sentence, "____"),
                    };
                    lines.push(Line::from(shown));
                    if app.hint_shown {
                        lines.push(Line::from(Span::styled(
                            format!("Hint: {}", target.definition),
                            DIM,
                        )));
                    }
                }
                _ => {
                    lines.push(Line::from("What word matches this definition?"));
                    lines.push(Line::from(target.definition.clone()));
                }
            }
            lines.push(Line::default());
            for (i, option) in round.options().iter().enumerate() {
                let style = if round.outcome().is_some() {
                    if i == round.correct_index() {
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                    } else if round.selected() == Some(i) {
                        Style::default().fg(Color::Red)
                    } else {
                        DIM
                    }
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(
                    format!(" {}. {}", i + 1, option.text),
                    style,
                )));
            }
            push_result_banner(&mut lines, round.outcome(), &target.text);
        }
        RoundView::Anagram { round } => {
            if app.hint_shown {
                lines.push(Line::from(format!("Definition: {}", round.target().definition)));
            } else {
                lines.push(Line::from(Span::styled("[F1] show definition hint", DIM)));
            }
            lines.push(Line::default());
            let mut answer: Vec<Span> = round
                .answer()
                .iter()
                .map(|ch| {
                    Span::styled(
                        format!(" {} ", ch.to_ascii_uppercase()),
                        Style::default().fg(Color::Black).bg(Color::Cyan),
                    )
                })
                .collect();
            for _ in round.answer().len()..round.target().text.chars().count() {
                answer.push(Span::styled(" _ ", DIM));
            }
            lines.push(Line::from(vec![Span::raw("Your answer: ")]));
            lines.push(Line::from(answer));
            lines.push(Line::default());
            let pool: Vec<Span> = round
                .pool()
                .iter()
                .map(|ch| Span::raw(format!(" {} ", ch.to_ascii_uppercase())))
                .collect();
            lines.push(Line::from(vec![Span::raw("Letters: ")]));
            lines.push(Line::from(pool));
            push_result_banner(&mut lines, round.outcome(), &round.target().text);
        }
    }

    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered()),
        centered(80, 90, body),
    );
}

fn push_result_banner(lines: &mut Vec<Line>, outcome: Option<RoundOutcome>, target: &str) {
    let Some(outcome) = outcome else { return };
    lines.push(Line::default());
    if outcome.correct {
        lines.push(Line::from(Span::styled(
            format!("Correct! +{} points", outcome.points),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("The word was: {target}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(Span::styled(" [Enter] Next word", DIM)));
}

fn render_complete(frame: &mut ratatui::Frame, app: &App) {
    let body = render_chrome(
        frame,
        "session complete",
        " [r] Play again  [s] Stats  [Enter/Esc] Menu ",
    );
    let Some(session) = &app.session else { return };
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "You've mastered every word at this difficulty!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(format!("Mode:        {}", session.mode.label())),
        Line::from(format!("Difficulty:  {}", session.difficulty)),
        Line::from(format!("Final score: {}", session.score)),
        Line::from(format!("Words:       {}", session.mastered().len())),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" well done ")),
        centered(60, 60, body),
    );
}

fn render_stats(frame: &mut ratatui::Frame, app: &App) {
    let body = render_chrome(
        frame,
        "statistics",
        " [r] Reset  [Esc] Back ",
    );
    let stats = app.stats.read();

    let mut lines = vec![
        Line::default(),
        Line::from(format!(" Rounds played: {}", stats.total_games_played)),
        Line::from(format!(" Total score:   {}", stats.total_score)),
        Line::from(format!(" Best streak:   {}", stats.best_streak)),
        Line::default(),
    ];
    for tier in Difficulty::ALL {
        lines.push(Line::from(format!(
            " {:<8} {:>4} correct  {:>4} incorrect",
            tier.as_str(),
            stats.correct_by_difficulty.get(tier),
            stats.incorrect_by_difficulty.get(tier),
        )));
    }
    lines.push(Line::default());
    for mode in GameMode::ALL {
        lines.push(Line::from(format!(
            " {:<18} {:>4} rounds",
            mode.label(),
            stats.games_by_mode.get(mode),
        )));
    }
    if !stats.incorrect_words.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(" Words to review:"));
        lines.push(Line::from(Span::styled(
            format!("   {}", stats.incorrect_words.join(", ")),
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(date) = &stats.last_played {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(format!(" Last played: {date}"), DIM)));
    }
    if app.stats_confirm_reset {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            " Reset all statistics? [y/n]",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" statistics ")),
        centered(70, 90, body),
    );
}

/// Center a rect taking the given percentage of width/height.
fn centered(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
