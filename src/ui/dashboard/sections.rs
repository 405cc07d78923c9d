use super::*;
use chrono::{DateTime, Local};

/// Format epoch milliseconds in local time.
pub(super) fn local_time(ms: i64, fmt: &str) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.with_timezone(&Local).format(fmt).to_string())
        .unwrap_or_default()
}

impl Dashboard {
    pub(super) fn render_timer(frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.focus == PanelFocus::Timer;
        let block = tile_block(TIMER_TITLE, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Mode switcher
                Constraint::Length(7), // Countdown
                Constraint::Length(1), // Running / paused
                Constraint::Length(1), // Progress bar
                Constraint::Min(0),    // Progress pie
            ])
            .split(inner);

        let mode = state.timer.mode();
        let running = state.timer.is_active();
        let remaining = state.timer.remaining_ms();
        let progress = state.timer.progress();

        let mode_span = |m: TimerMode| {
            if m == mode {
                let color = match m {
                    TimerMode::Focus => Color::LightRed,
                    TimerMode::Break => Color::LightGreen,
                };
                Span::styled(
                    format!(" {} ", m.label()),
                    Style::default().fg(Color::Black).bg(color).bold(),
                )
            } else {
                Span::styled(format!(" {} ", m.label()), Style::default().fg(Color::DarkGray))
            }
        };
        let switcher = Line::from(vec![
            mode_span(TimerMode::Focus),
            Span::raw("  "),
            mode_span(TimerMode::Break),
        ]);
        frame.render_widget(Paragraph::new(switcher).alignment(Alignment::Center), chunks[0]);

        let clock_text = format_clock(remaining);
        let clock_style = if running {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(BigClock::new(&clock_text).style(clock_style), chunks[1]);

        let status = if running { TIMER_RUNNING } else { TIMER_PAUSED };
        frame.render_widget(
            Paragraph::new(status)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );

        let bar_area = chunks[3].inner(ratatui::layout::Margin::new(2, 0));
        frame.render_widget(TimerBar::new(progress, BarState::new(mode, running)), bar_area);

        if chunks[4].height >= 6 {
            Self::render_progress_pie(frame, chunks[4], progress, mode);
        }
    }

    fn render_progress_pie(frame: &mut Frame, area: Rect, progress: f64, mode: TimerMode) {
        let elapsed = progress * 100.0;
        let left = 100.0 - elapsed;

        let mut slices = Vec::new();
        if elapsed > 0.0 {
            let color = match mode {
                TimerMode::Focus => Color::LightRed,
                TimerMode::Break => Color::LightGreen,
            };
            slices.push(PieSlice::new("Elapsed", elapsed, color));
        }
        if left > 0.0 {
            slices.push(PieSlice::new("Left", left, Color::DarkGray));
        }

        // tui_piechart doesn't render single-slice charts correctly
        if slices.len() == 1 {
            slices.push(PieSlice::new("", 0.001, Color::Reset));
        }

        let chart = PieChart::new(slices)
            .show_legend(true)
            .show_percentages(true)
            .block(Block::default().borders(Borders::NONE));

        frame.render_widget(chart, area);
    }

    pub(super) fn render_news(frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.focus == PanelFocus::News;
        let block = tile_block(NEWS_TITLE, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Query
                Constraint::Length(1), // Spacer
                Constraint::Min(0),    // Stories
            ])
            .split(inner);

        let editing = Self::is_editing(state, PanelFocus::News);
        let query = if editing {
            state.query_input.as_str()
        } else {
            state.news.query()
        };
        frame.render_widget(Paragraph::new(input_line("/ ", query, editing, "")), chunks[0]);

        let body = chunks[2];
        match state.news.status() {
            NewsStatus::Idle => {
                frame.render_widget(
                    Paragraph::new(NEWS_IDLE).style(Style::default().fg(Color::DarkGray)),
                    body,
                );
            }
            NewsStatus::Loading => {
                frame.render_widget(
                    Paragraph::new(NEWS_LOADING)
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK)),
                    body,
                );
            }
            NewsStatus::Empty => {
                frame.render_widget(
                    Paragraph::new(NEWS_EMPTY)
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true })
                        .style(Style::default().fg(Color::DarkGray)),
                    body,
                );
            }
            NewsStatus::Error(message) => {
                let lines = vec![
                    Line::from(Span::styled(NEWS_ERROR, Style::default().fg(Color::Red).bold())),
                    Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red))),
                    Line::from(""),
                    Line::from(vec![
                        Span::raw("Press "),
                        Span::styled("r", Style::default().fg(Color::Yellow)),
                        Span::raw(" to retry"),
                    ]),
                ];
                frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), body);
            }
            NewsStatus::Unauthorized(message) => {
                let lines = vec![
                    Line::from(Span::styled(NEWS_AUTH, Style::default().fg(Color::Yellow).bold())),
                    Line::from(Span::styled(message.as_str(), Style::default().fg(Color::DarkGray))),
                    Line::from(""),
                    Line::from(NEWS_AUTH_HINT),
                ];
                frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), body);
            }
            NewsStatus::Loaded => {
                let items: Vec<ListItem> = state
                    .news
                    .displayed()
                    .iter()
                    .map(|record| {
                        let mut meta = vec![Span::styled(
                            record.source.as_str(),
                            Style::default().fg(Color::Cyan),
                        )];
                        if let Some(date) = &record.date {
                            meta.push(Span::styled(
                                format!(" · {}", date),
                                Style::default().fg(Color::DarkGray),
                            ));
                        }
                        ListItem::new(Text::from(vec![
                            Line::from(Span::styled(
                                record.title.as_str(),
                                Style::default().fg(Color::White).bold(),
                            )),
                            Line::from(meta),
                            Line::from(Span::styled(
                                record.url.as_str(),
                                Style::default().fg(Color::DarkGray),
                            )),
                        ]))
                    })
                    .collect();
                frame.render_widget(List::new(items), body);
            }
        }
    }

    pub(super) fn render_memo(frame: &mut Frame, area: Rect, state: &mut AppState) {
        let focused = state.focus == PanelFocus::Memo;
        let block = tile_block(MEMO_TITLE, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // New memo
                Constraint::Length(1), // Spacer
                Constraint::Min(0),    // Memos
            ])
            .split(inner);

        let editing = Self::is_editing(state, PanelFocus::Memo);
        frame.render_widget(
            Paragraph::new(input_line("+ ", &state.memo_input, editing, MEMO_PLACEHOLDER)),
            chunks[0],
        );

        if state.memos.is_empty() {
            frame.render_widget(
                Paragraph::new(MEMO_EMPTY)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                chunks[2],
            );
            return;
        }

        let items: Vec<ListItem> = state
            .memos
            .iter()
            .map(|memo| {
                ListItem::new(Text::from(vec![
                    Line::from(Span::styled(
                        local_time(memo.created_at, "%m/%d %H:%M"),
                        Style::default().fg(Color::DarkGray),
                    )),
                    Line::from(memo.content.as_str()),
                ]))
            })
            .collect();

        let highlight = if focused {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .highlight_style(highlight)
            .highlight_symbol(if focused { "▌" } else { " " });

        frame.render_stateful_widget(list, chunks[2], &mut state.memo_list);
    }

    pub(super) fn render_clock_weather(frame: &mut Frame, area: Rect, state: &AppState) {
        let block = tile_block(CLOCK_TITLE, false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // HH:MM
                Constraint::Length(1), // Date
                Constraint::Length(1), // Spacer
                Constraint::Min(0),    // Weather
            ])
            .split(inner);

        let now = state.now_ms();
        let time = local_time(now, "%H:%M");
        frame.render_widget(
            BigClock::new(&time).style(Style::default().fg(Color::White)),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(local_time(now, "%b %d %a"))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray)),
            chunks[1],
        );

        let reading = state.weather.reading();
        let location = state
            .weather
            .place()
            .map(|p| p.name.as_str())
            .unwrap_or(reading.location.as_str());

        let mut lines = vec![Line::from(vec![
            Span::styled("@ ", Style::default().fg(Color::DarkGray)),
            Span::raw(location),
        ])];

        match state.weather.status() {
            WeatherStatus::Locating => {
                lines = vec![Line::from(Span::styled(
                    WEATHER_LOCATING,
                    Style::default().fg(Color::Yellow),
                ))];
            }
            WeatherStatus::Loading => {
                lines.push(Line::from(Span::styled(
                    WEATHER_LOADING,
                    Style::default().fg(Color::Yellow),
                )));
            }
            WeatherStatus::Ready => {
                let mut condition = vec![
                    Span::raw(format!("{} ", reading.condition.icon().glyph())),
                    Span::raw(reading.condition.label()),
                    Span::raw("  "),
                    Span::styled(format!("{:.1}°C", reading.temp), Style::default().bold()),
                ];
                if let Some(feels) = reading.feels_like {
                    condition.push(Span::styled(
                        format!("  feels {:.0}°", feels),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                lines.push(Line::from(condition));
            }
            WeatherStatus::Error(message) => {
                lines.push(Line::from(Span::styled(
                    WEATHER_UNAVAILABLE,
                    Style::default().fg(Color::Red),
                )));
                lines.push(Line::from(Span::styled(
                    message.as_str(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            chunks[3],
        );
    }

    pub(super) fn render_quote(frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.focus == PanelFocus::Quote;
        let block = tile_block(QUOTE_TITLE, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(quote) = state.quote.current() else {
            return;
        };

        let fading = state.quote.is_fading(state.now_ms());
        let (primary, secondary) = if fading {
            (
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            )
        } else {
            (
                Style::default().fg(Color::White).bold(),
                Style::default().fg(Color::Gray),
            )
        };

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(quote.ja, primary)),
            Line::from(""),
            Line::from(Span::styled(quote.en, secondary.add_modifier(Modifier::ITALIC))),
            Line::from(Span::styled(quote.tw, secondary)),
        ];

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
    }
}
