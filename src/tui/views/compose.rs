//! Compose step: message editor, template and variable pickers, preview
//! bubble and the save-as-template field.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use ratatui_textarea::{CursorMove, TextArea};

use crate::core::catalog::Template;
use crate::core::composer::{
    ComposerEvent, ComposerTab, MessageComposer, TemplateRequest, MAX_CHARACTERS,
    START_FROM_SCRATCH,
};
use crate::tui::app::centered_rect;
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;

/// What the compose view wants the shell to do after an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeResult {
    Consumed,
    Proceed,
    SaveTemplate(TemplateRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeMode {
    Normal,
    /// Keys go to the message editor.
    Insert,
    /// Keys go to the template-name field.
    TemplateName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Picker {
    Template { cursor: usize },
    Variable { cursor: usize },
}

pub struct ComposeViewState {
    composer: MessageComposer,
    editor: TextArea<'static>,
    mode: ComposeMode,
    picker: Option<Picker>,
    name_input: InputBuffer,
    /// Inline hint under the save field after a rejected save.
    save_hint: Option<&'static str>,
}

impl ComposeViewState {
    pub fn new(services: &Services) -> Self {
        let composer = MessageComposer::new(
            services.catalog.templates.clone(),
            services.catalog.variables.clone(),
        );
        Self {
            editor: build_editor(composer.content()),
            composer,
            mode: ComposeMode::Normal,
            picker: None,
            name_input: InputBuffer::new(),
            save_hint: None,
        }
    }

    pub fn composer(&self) -> &MessageComposer {
        &self.composer
    }

    pub fn mode(&self) -> ComposeMode {
        self.mode
    }

    /// True while keystrokes are being captured as text.
    pub fn is_typing(&self) -> bool {
        self.mode != ComposeMode::Normal || self.picker.is_some()
    }

    /// Add a template saved during this session to the picker.
    pub fn add_template(&mut self, template: Template) {
        self.composer.add_template(template);
    }

    fn sync_editor(&mut self) {
        self.editor = build_editor(self.composer.content());
    }

    /// Picker rows: the scratch entry followed by every template.
    fn template_rows(&self) -> Vec<(&str, &str)> {
        std::iter::once((START_FROM_SCRATCH, "Start from scratch"))
            .chain(
                self.composer
                    .templates()
                    .iter()
                    .map(|t| (t.id.as_str(), t.name.as_str())),
            )
            .collect()
    }

    // ── Input ───────────────────────────────────────────────────────────

    /// Returns `None` when the key is not handled here.
    pub fn handle_input(&mut self, event: &Event) -> Option<ComposeResult> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if let Some(picker) = self.picker {
            self.handle_picker_input(picker, key);
            return Some(ComposeResult::Consumed);
        }

        match self.mode {
            ComposeMode::Insert => {
                if key.code == KeyCode::Esc {
                    self.mode = ComposeMode::Normal;
                } else {
                    self.editor.input(event.clone());
                    self.composer.edit_content(self.editor.lines().join("\n"));
                }
                Some(ComposeResult::Consumed)
            }
            ComposeMode::TemplateName => Some(self.handle_name_input(key)),
            ComposeMode::Normal => self.handle_normal_input(key),
        }
    }

    fn handle_normal_input(&mut self, key: &KeyEvent) -> Option<ComposeResult> {
        if !matches!(key.modifiers, KeyModifiers::NONE | KeyModifiers::SHIFT) {
            return None;
        }
        match key.code {
            KeyCode::Char('i') | KeyCode::Enter => {
                if self.composer.tab() == ComposerTab::Preview {
                    self.composer.set_tab(ComposerTab::Compose);
                }
                self.mode = ComposeMode::Insert;
            }
            KeyCode::Char('t') => self.picker = Some(Picker::Template { cursor: 0 }),
            KeyCode::Char('v') => {
                if !self.composer.variables().is_empty() {
                    self.picker = Some(Picker::Variable { cursor: 0 });
                }
            }
            KeyCode::Char('p') => self.composer.toggle_tab(),
            KeyCode::Char('s') => {
                self.mode = ComposeMode::TemplateName;
                self.save_hint = None;
            }
            KeyCode::Char('n') => {
                return Some(match self.composer.proceed() {
                    Some(ComposerEvent::Proceed) => ComposeResult::Proceed,
                    _ => ComposeResult::Consumed,
                });
            }
            _ => return None,
        }
        Some(ComposeResult::Consumed)
    }

    fn handle_picker_input(&mut self, picker: Picker, key: &KeyEvent) {
        let len = match picker {
            Picker::Template { .. } => self.template_rows().len(),
            Picker::Variable { .. } => self.composer.variables().len(),
        };
        let cursor = match picker {
            Picker::Template { cursor } | Picker::Variable { cursor } => cursor,
        };
        let moved = |c: usize| match picker {
            Picker::Template { .. } => Picker::Template { cursor: c },
            Picker::Variable { .. } => Picker::Variable { cursor: c },
        };

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.picker = Some(moved((cursor + 1).min(len.saturating_sub(1))));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.picker = Some(moved(cursor.saturating_sub(1)));
            }
            KeyCode::Enter => {
                self.picker = None;
                match picker {
                    Picker::Template { .. } => {
                        let id = self.template_rows().get(cursor).map(|(id, _)| id.to_string());
                        if let Some(id) = id {
                            if self.composer.select_template(&id) {
                                self.sync_editor();
                            }
                        }
                    }
                    Picker::Variable { .. } => {
                        let placeholder = self
                            .composer
                            .variables()
                            .get(cursor)
                            .map(|v| v.placeholder.clone());
                        if let Some(placeholder) = placeholder {
                            self.composer.insert_variable(&placeholder);
                            self.sync_editor();
                        }
                    }
                }
            }
            KeyCode::Esc => self.picker = None,
            _ => {}
        }
    }

    fn handle_name_input(&mut self, key: &KeyEvent) -> ComposeResult {
        match key.code {
            KeyCode::Esc => {
                self.mode = ComposeMode::Normal;
                self.save_hint = None;
            }
            KeyCode::Enter => match self.composer.save_as_template() {
                Some(ComposerEvent::SaveTemplate(request)) => {
                    self.name_input.clear();
                    self.mode = ComposeMode::Normal;
                    self.save_hint = None;
                    return ComposeResult::SaveTemplate(request);
                }
                _ => {
                    self.save_hint = Some(if self.composer.content().is_empty() {
                        "Write a message before saving it as a template"
                    } else {
                        "Enter a template name"
                    });
                }
            },
            _ => {
                if self.name_input.handle_key(key) {
                    self.composer.set_template_name(self.name_input.text());
                }
            }
        }
        ComposeResult::Consumed
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let cols =
            Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).split(area);

        self.render_message_card(frame, cols[0]);
        self.render_side_panel(frame, cols[1]);

        if let Some(picker) = self.picker {
            self.render_picker(frame, area, picker);
        }
    }

    fn render_message_card(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Compose Message");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1), // template selector
            Constraint::Length(1), // compose/preview tabs
            Constraint::Length(1),
            Constraint::Min(3), // editor / preview
            Constraint::Length(1), // counter
            Constraint::Length(1), // limit hint
            Constraint::Length(1),
            Constraint::Length(1), // proceed button
        ])
        .split(inner);

        let template_label = match self.composer.selected_template() {
            Some(START_FROM_SCRATCH) => "Start from scratch",
            Some(_) => self.composer.selected_template_name().unwrap_or("Select a template"),
            None => "Select a template",
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" Template: ", theme::muted()),
                Span::styled(template_label, Style::default().fg(theme::TEXT)),
                Span::styled("  [t]", theme::key_hint()),
            ])),
            rows[0],
        );

        let tab_spans: Vec<Span> = [ComposerTab::Compose, ComposerTab::Preview]
            .iter()
            .flat_map(|&tab| {
                let style = if tab == self.composer.tab() {
                    theme::highlight()
                } else {
                    theme::muted()
                };
                [Span::styled(format!(" {} ", tab.label()), style), Span::raw("│")]
            })
            .chain([Span::styled(" [p]", theme::key_hint())])
            .collect();
        frame.render_widget(Paragraph::new(Line::from(tab_spans)), rows[1]);

        match self.composer.tab() {
            ComposerTab::Compose => self.render_editor(frame, rows[3]),
            ComposerTab::Preview => self.render_preview(frame, rows[3]),
        }

        let draft = self.composer.draft();
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}/{} characters", draft.char_count(), MAX_CHARACTERS),
                theme::char_counter(draft.is_over_limit()),
            )),
            rows[4],
        );
        if draft.is_over_limit() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    " Message exceeds character limit",
                    Style::default().fg(theme::ERROR),
                )),
                rows[5],
            );
        }

        let enabled = self.composer.can_proceed();
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" Next: Select Recipients → ", theme::button(enabled)),
                Span::styled(" [n]", theme::key_hint()),
            ]))
            .alignment(Alignment::Right),
            rows[7],
        );
    }

    fn render_editor(&self, frame: &mut Frame, area: Rect) {
        let mut editor = self.editor.clone();
        let border = if self.mode == ComposeMode::Insert {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        editor.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Message "),
        );
        if self.mode != ComposeMode::Insert {
            editor.set_cursor_style(Style::default());
        }
        frame.render_widget(&editor, area);
    }

    fn render_preview(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_default("Preview");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (bubble, footer) = preview_regions(inner);

        let text_style = if self.composer.content().is_empty() {
            theme::bubble().add_modifier(Modifier::ITALIC)
        } else {
            theme::bubble()
        };
        frame.render_widget(
            Paragraph::new(self.composer.preview_text())
                .style(text_style)
                .wrap(Wrap { trim: false })
                .block(Block::default().style(theme::bubble())),
            bubble,
        );

        let draft = self.composer.draft();
        let mut counter = vec![Span::styled(
            format!(" {} characters", draft.char_count()),
            theme::muted(),
        )];
        if draft.is_over_limit() {
            counter.push(Span::styled(" (exceeds limit)", Style::default().fg(theme::ERROR)));
        }
        frame.render_widget(Paragraph::new(Line::from(counter)), footer);
    }

    fn render_side_panel(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Min(4), Constraint::Length(6)]).split(area);

        let var_block = theme::block_default("Variables [v]");
        let items: Vec<ListItem> = self
            .composer
            .variables()
            .iter()
            .map(|v| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {:<14}", v.label), Style::default().fg(theme::TEXT)),
                    Span::styled(v.placeholder.clone(), theme::muted()),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items).block(var_block), rows[0]);

        let save_block = if self.mode == ComposeMode::TemplateName {
            theme::block_focused("Save as Template [s]")
        } else {
            theme::block_default("Save as Template [s]")
        };
        let inner = save_block.inner(rows[1]);
        frame.render_widget(save_block, rows[1]);
        let field_rows =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).split(inner);
        self.name_input.render(
            frame,
            field_rows[0],
            Block::default().borders(Borders::ALL).border_style(theme::border_default()),
            "Template name",
            self.mode == ComposeMode::TemplateName,
        );
        if let Some(hint) = self.save_hint {
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {hint}"), Style::default().fg(theme::WARNING))),
                field_rows[1],
            );
        }
    }

    fn render_picker(&self, frame: &mut Frame, area: Rect, picker: Picker) {
        let modal = centered_rect(50, 50, area);
        let (title, rows, cursor): (&str, Vec<String>, usize) = match picker {
            Picker::Template { cursor } => (
                "Select Template",
                self.template_rows()
                    .into_iter()
                    .map(|(_, name)| name.to_string())
                    .collect(),
                cursor,
            ),
            Picker::Variable { cursor } => (
                "Insert Variable",
                self.composer
                    .variables()
                    .iter()
                    .map(|v| format!("{}  {}", v.label, v.placeholder))
                    .collect(),
                cursor,
            ),
        };

        let list = List::new(rows.into_iter().map(ListItem::new).collect::<Vec<_>>())
            .block(theme::block_focused(title))
            .highlight_style(theme::highlight())
            .highlight_symbol("▸ ");
        let mut state = ListState::default().with_selected(Some(cursor));

        frame.render_widget(Clear, modal);
        frame.render_stateful_widget(list, modal, &mut state);
    }
}

/// Chat bubble and the character-count footer row below it.
fn preview_regions(inner: Rect) -> (Rect, Rect) {
    let bubble_width = (inner.width * 3 / 4).max(10).min(inner.width);
    let bubble = Rect::new(
        inner.x + 1,
        inner.y + 1,
        bubble_width.saturating_sub(1),
        inner.height.saturating_sub(2),
    );
    let footer = Rect::new(inner.x, inner.y + inner.height.saturating_sub(1), inner.width, 1);
    (bubble, footer)
}

fn build_editor(content: &str) -> TextArea<'static> {
    let mut editor = TextArea::new(content.split('\n').map(String::from).collect());
    editor.set_placeholder_text("Type your message here...");
    editor.set_cursor_line_style(Style::default());
    editor.move_cursor(CursorMove::Bottom);
    editor.move_cursor(CursorMove::End);
    editor
}
