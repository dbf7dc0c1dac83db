use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::PricingPlan;
use crate::domain::models::SessionType;
use crate::domain::models::Therapist;
use crate::domain::models::View;
use crate::domain::services::events::EventsService;
use crate::domain::services::theme_color;
use crate::domain::services::AppState;
use crate::domain::services::ChatSession;
use crate::domain::services::UserStore;

fn block(title: &str) -> Block<'_> {
    return Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .padding(Padding::new(1, 1, 0, 0));
}

fn render_menu<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let items = app_state
        .menu()
        .into_iter()
        .map(|e| return ListItem::new(e.label))
        .collect::<Vec<ListItem>>();

    let mut state = ListState::default();
    state.select(Some(app_state.menu_index));

    frame.render_stateful_widget(
        List::new(items)
            .block(block("Escolha uma opção"))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan))
            .highlight_symbol("> "),
        rect,
        &mut state,
    );
}

fn render_text<B: Backend>(frame: &mut Frame<B>, rect: Rect, title: &str, lines: Vec<Line>) {
    frame.render_widget(
        Paragraph::new(lines)
            .block(block(title))
            .wrap(Wrap { trim: false }),
        rect,
    );
}

/// Splits a menu screen into the description on top and the menu below.
fn menu_layout(rect: Rect, menu_len: usize) -> std::rc::Rc<[Rect]> {
    let menu_height = u16::try_from(menu_len + 2).unwrap_or(u16::MAX);
    return Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Min(3), Constraint::Length(menu_height)])
        .split(rect);
}

fn render_landing<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let layout = menu_layout(rect, app_state.menu().len());
    let lines = vec![
        Line::from(Span::styled(
            "Um espaço seguro para desabafar.",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Converse de forma anônima com um terapeuta virtual, por texto ou por voz."),
        Line::from("Sem cadastro: suas primeiras sessões são gratuitas."),
        Line::from(""),
        Line::from("Este serviço não substitui acompanhamento profissional. Em caso de crise, ligue 188 (CVV)."),
    ];

    render_text(frame, layout[0], "Desabafa.AI", lines);
    render_menu(frame, layout[1], app_state);
}

fn render_session_type<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let layout = menu_layout(rect, SessionType::all().len());
    let lines = vec![
        Line::from("Que tipo de conversa você precisa hoje?"),
        Line::from(""),
        Line::from("Escolha o tema da sessão. Você pode voltar a qualquer momento com Esc."),
    ];

    render_text(frame, layout[0], "Tipo de sessão", lines);
    render_menu(frame, layout[1], app_state);
}

fn render_therapist_selection<B: Backend>(
    frame: &mut Frame<B>,
    rect: Rect,
    app_state: &AppState,
) {
    let layout = menu_layout(rect, Therapist::all().len());
    let mut lines = vec![Line::from("Com quem você quer conversar?"), Line::from("")];

    if let Some(therapist) = Therapist::all().get(app_state.menu_index) {
        let color = theme_color(therapist.color);
        lines.push(Line::from(Span::styled(
            format!("{} {} - {}", therapist.icon, therapist.name, therapist.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(therapist.description));
        lines.push(Line::from(""));
        lines.push(Line::from(format!("Personalidade: {}", therapist.personality)));
        lines.push(Line::from(format!(
            "Especialidades: {}",
            therapist.specialties.join(", ")
        )));
    }

    render_text(frame, layout[0], "Terapeuta virtual", lines);
    render_menu(frame, layout[1], app_state);
}

fn chat_status(app_state: &AppState) -> Option<Line<'static>> {
    if app_state.recording {
        return Some(Line::from(Span::styled(
            "● Gravando... Ctrl+R para parar e enviar.",
            Style::default().fg(Color::Red),
        )));
    }
    if app_state.now_playing.is_some() {
        return Some(Line::from(Span::styled(
            "♪ Reproduzindo resposta. Ctrl+S para parar.",
            Style::default().fg(Color::Cyan),
        )));
    }
    if let Some(notice) = &app_state.notice {
        return Some(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }

    return None;
}

fn render_chat<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &mut AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Max(4),
        ])
        .split(rect);

    if layout[0].width != app_state.last_known_width
        || layout[0].height != app_state.last_known_height
    {
        app_state.set_rect(layout[0]);
    }

    if !app_state.connecting && app_state.chat.session().is_none() {
        render_text(
            frame,
            layout[0],
            "Desabafa.AI",
            vec![
                Line::from("Não foi possível iniciar a sessão."),
                Line::from("Verifique sua conexão e pressione Esc para tentar novamente."),
            ],
        );
    } else {
        app_state.bubble_list.render(frame, layout[0]);
    }

    if let Some(status) = chat_status(app_state) {
        frame.render_widget(Paragraph::new(status), layout[1]);
    }

    if app_state.connecting {
        Loading::new("Conectando...").render(frame, layout[2]);
    } else if app_state.chat.is_in_flight() {
        Loading::default().render(frame, layout[2]);
    } else {
        frame.render_widget(app_state.textarea.widget(), layout[2]);
    }
}

fn render_pricing<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let layout = menu_layout(rect, PricingPlan::all().len());
    let mut lines = vec![];

    if let Some(plan) = PricingPlan::all().get(app_state.menu_index) {
        let mut title = format!("{} - {}{}", plan.name, plan.price, plan.period);
        if plan.popular {
            title = format!("{title}  [Mais popular]");
        }
        lines.push(Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(plan.description));
        lines.push(Line::from(""));
        for feature in plan.features {
            lines.push(Line::from(Span::styled(
                format!("✓ {feature}"),
                Style::default().fg(Color::Green),
            )));
        }
        for limitation in plan.limitations {
            lines.push(Line::from(Span::styled(
                format!("✗ {limitation}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    if let Some(notice) = &app_state.notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }

    render_text(frame, layout[0], "Planos", lines);
    render_menu(frame, layout[1], app_state);
}

fn render_dashboard<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let layout = menu_layout(rect, app_state.menu().len());
    let mut lines = vec![];

    if let Some(user) = &app_state.view.user {
        lines.push(Line::from(Span::styled(
            format!("Olá, {}", user.display_name()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("Plano: {}", user.plan_label())));
        lines.push(Line::from(format!(
            "Sessões restantes: {}",
            user.sessions_remaining_label()
        )));

        match &app_state.dashboard {
            Some(dashboard) => {
                lines.push(Line::from(format!(
                    "Sessões realizadas: {}",
                    dashboard.sessions.len()
                )));
                lines.push(Line::from(format!(
                    "Relatórios disponíveis: {}",
                    dashboard.reports.len()
                )));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Histórico",
                    Style::default().add_modifier(Modifier::UNDERLINED),
                )));

                if dashboard.sessions.is_empty() {
                    lines.push(Line::from("Nenhuma sessão ainda."));
                }
                for session in &dashboard.sessions {
                    let mut entry = format!(
                        "{} com {} · {} mensagens · {}",
                        SessionType::label(&session.session_type),
                        Therapist::label(&session.therapist_profile),
                        session.message_count,
                        session.created_at
                    );
                    if session.is_active {
                        entry = format!("{entry} · ativa");
                    }
                    lines.push(Line::from(entry));
                }
            }
            None => {
                lines.push(Line::from(""));
                lines.push(Line::from("Carregando histórico..."));
            }
        }
    } else {
        lines.push(Line::from("Você ainda não tem uma conta neste dispositivo."));
        lines.push(Line::from(""));
        lines.push(Line::from(
            "Continue como anônimo para acompanhar suas sessões. Nenhum dado pessoal é pedido.",
        ));
    }

    if let Some(notice) = &app_state.notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }

    render_text(frame, layout[0], "Meu painel", lines);
    render_menu(frame, layout[1], app_state);
}

fn render<B: Backend>(frame: &mut Frame<B>, app_state: &mut AppState) {
    let rect = frame.size();

    match app_state.view.view {
        View::Landing => render_landing(frame, rect, app_state),
        View::SessionType => render_session_type(frame, rect, app_state),
        View::TherapistSelection => render_therapist_selection(frame, rect, app_state),
        View::Chat => render_chat(frame, rect, app_state),
        View::Pricing => render_pricing(frame, rect, app_state),
        View::Dashboard => render_dashboard(frame, rect, app_state),
    }
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<'_>,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    #[cfg(feature = "dev")]
    {
        for char in "Tenho me sentido muito ansiosa com o trabalho.".chars() {
            app_state.textarea.insert_char(char);
        }
    }

    loop {
        terminal.draw(|frame| render(frame, app_state))?;

        let event = events.next().await?;
        app_state.handle_event(event).await?;
        for action in app_state.take_actions() {
            tx.send(action)?;
        }

        if app_state.should_quit {
            break;
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    if let Err(err) = disable_raw_mode() {
        tracing::error!(error = ?err, "Failed to disable raw mode");
    }
    if let Err(err) = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste,
        cursor::Show
    ) {
        tracing::error!(error = ?err, "Failed to restore terminal");
    }
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut app_state = AppState::new(UserStore::default(), ChatSession::default()).await?;
    let mut events = EventsService::new(rx);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let res = start_loop(&mut terminal, &mut app_state, tx, &mut events).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
