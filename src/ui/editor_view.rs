use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::components;
use super::map_picker::PickerState;
use crate::editor::SheetForm;
use crate::models::{ColourRound, Sheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoterField {
    Name,
    Age,
    Colour,
}

/// Focusable stops on the sheet form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFocus {
    HouseName,
    ColourRound,
    Community,
    NoOfVoters,
    Location,
    Voter { index: usize, field: VoterField },
    Save,
}

/// State behind the sheet editor: the draft form, the focus cursor, the
/// in-flight save guard and the optional location-picker overlay
pub struct EditorState {
    pub form: SheetForm,
    pub focus: EditorFocus,
    pub saving: bool,
    pub picker: Option<PickerState>,
    voter_list: ListState,
}

impl EditorState {
    pub fn new_sheet() -> Self {
        Self {
            form: SheetForm::new(),
            focus: EditorFocus::HouseName,
            saving: false,
            picker: None,
            voter_list: ListState::default(),
        }
    }

    pub fn edit_sheet(sheet: &Sheet) -> Self {
        Self {
            form: SheetForm::for_sheet(sheet),
            focus: EditorFocus::HouseName,
            saving: false,
            picker: None,
            voter_list: ListState::default(),
        }
    }

    /// The tab order grows and shrinks with the derived voter list
    fn focus_order(&self) -> Vec<EditorFocus> {
        let mut order = vec![
            EditorFocus::HouseName,
            EditorFocus::ColourRound,
            EditorFocus::Community,
            EditorFocus::NoOfVoters,
            EditorFocus::Location,
        ];
        for index in 0..self.form.voters.len() {
            order.push(EditorFocus::Voter {
                index,
                field: VoterField::Name,
            });
            order.push(EditorFocus::Voter {
                index,
                field: VoterField::Age,
            });
            order.push(EditorFocus::Voter {
                index,
                field: VoterField::Colour,
            });
        }
        order.push(EditorFocus::Save);
        order
    }

    pub fn next_focus(&mut self) {
        self.step_focus(1);
    }

    pub fn previous_focus(&mut self) {
        self.step_focus(-1);
    }

    fn step_focus(&mut self, step: isize) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = (current as isize + step).rem_euclid(order.len() as isize) as usize;
        self.focus = order[next];
    }

    /// Shrinking the voter list can orphan the focus; pull it back onto a
    /// stop that still exists
    fn clamp_focus(&mut self) {
        if let EditorFocus::Voter { index, .. } = self.focus {
            if index >= self.form.voters.len() {
                self.focus = EditorFocus::Save;
            }
        }
    }

    pub fn input(&mut self, c: char) {
        match self.focus {
            EditorFocus::HouseName => self.form.house_name.push(c),
            EditorFocus::Community => self.form.community.push(c),
            EditorFocus::NoOfVoters => {
                if c.is_ascii_digit() {
                    let mut raw = self.form.no_of_voters.clone();
                    raw.push(c);
                    self.form.set_no_of_voters(raw);
                    self.clamp_focus();
                }
            }
            EditorFocus::Voter { index, field } => {
                if let Some(voter) = self.form.voter_mut(index) {
                    match field {
                        VoterField::Name => voter.name.push(c),
                        VoterField::Age => {
                            if c.is_ascii_digit() {
                                voter.age.push(c);
                            }
                        }
                        VoterField::Colour => {}
                    }
                }
            }
            EditorFocus::ColourRound | EditorFocus::Location | EditorFocus::Save => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            EditorFocus::HouseName => {
                self.form.house_name.pop();
            }
            EditorFocus::Community => {
                self.form.community.pop();
            }
            EditorFocus::NoOfVoters => {
                let mut raw = self.form.no_of_voters.clone();
                raw.pop();
                self.form.set_no_of_voters(raw);
                self.clamp_focus();
            }
            EditorFocus::Voter { index, field } => {
                if let Some(voter) = self.form.voter_mut(index) {
                    match field {
                        VoterField::Name => {
                            voter.name.pop();
                        }
                        VoterField::Age => {
                            voter.age.pop();
                        }
                        VoterField::Colour => {}
                    }
                }
            }
            EditorFocus::ColourRound | EditorFocus::Location | EditorFocus::Save => {}
        }
    }

    /// Left/right on a colour stop cycles through the seven labels
    pub fn cycle_colour(&mut self, step: isize) {
        match self.focus {
            EditorFocus::ColourRound => {
                self.form.colour_round = Some(cycled(self.form.colour_round, step));
            }
            EditorFocus::Voter {
                index,
                field: VoterField::Colour,
            } => {
                if let Some(voter) = self.form.voter_mut(index) {
                    voter.colour_round = Some(cycled(voter.colour_round, step));
                }
            }
            _ => {}
        }
    }
}

fn cycled(current: Option<ColourRound>, step: isize) -> ColourRound {
    let all = ColourRound::ALL;
    match current {
        None => {
            if step >= 0 {
                all[0]
            } else {
                all[all.len() - 1]
            }
        }
        Some(colour) => {
            let i = all.iter().position(|c| *c == colour).unwrap_or(0);
            all[(i as isize + step).rem_euclid(all.len() as isize) as usize]
        }
    }
}

pub fn render(f: &mut Frame, state: &mut EditorState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(3), // house / colour
            Constraint::Length(3), // community / voters
            Constraint::Length(3), // location
            Constraint::Min(4),    // voter cards
            Constraint::Length(3), // save
            Constraint::Length(3), // hints
        ])
        .split(f.area());

    let title = if state.form.is_editing() {
        "📝 Edit Sheet"
    } else {
        "📝 New Sheet"
    };
    f.render_widget(
        Paragraph::new(title)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan)),
        chunks[0],
    );

    let row1 = split_half(chunks[1]);
    components::render_text_input(
        f,
        row1[0],
        "House Name *",
        &state.form.house_name,
        state.focus == EditorFocus::HouseName,
    );
    render_colour_selector(
        f,
        row1[1],
        "Colour Round *",
        state.form.colour_round,
        state.focus == EditorFocus::ColourRound,
    );

    let row2 = split_half(chunks[2]);
    components::render_text_input(
        f,
        row2[0],
        "Community *",
        &state.form.community,
        state.focus == EditorFocus::Community,
    );
    components::render_text_input(
        f,
        row2[1],
        "No. of Voters *",
        &state.form.no_of_voters,
        state.focus == EditorFocus::NoOfVoters,
    );

    render_location_row(f, chunks[3], state);
    render_voter_cards(f, chunks[4], state);
    render_save_row(f, chunks[5], state);

    components::render_key_hints(
        f,
        chunks[6],
        "Tab/↓: Next | Shift+Tab/↑: Previous | ←/→: Cycle colour | Enter: Open/Save | Esc: Cancel",
    );

    if let Some(picker) = &state.picker {
        super::map_picker::render(f, picker);
    }
}

fn split_half(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

fn render_colour_selector(
    f: &mut Frame,
    area: Rect,
    label: &str,
    colour: Option<ColourRound>,
    focused: bool,
) {
    let value = match colour {
        Some(c) => Line::from(vec![
            Span::raw("◄ "),
            components::colour_span(c),
            Span::raw(format!(" {} ►", c.label())),
        ]),
        None => Line::from(Span::styled("◄ Select colour ►", Style::default().fg(Color::Gray))),
    };
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    f.render_widget(
        Paragraph::new(value)
            .block(Block::default().borders(Borders::ALL).title(label.to_string()))
            .style(style),
        area,
    );
}

fn render_location_row(f: &mut Frame, area: Rect, state: &EditorState) {
    let focused = state.focus == EditorFocus::Location;
    let value = match state.form.location {
        Some(location) => Line::from(vec![
            Span::styled("📍 ", Style::default().fg(Color::Green)),
            Span::raw(format!("Location set: {}", location)),
        ]),
        None => Line::from("Set location on map (Enter)"),
    };
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    f.render_widget(
        Paragraph::new(value)
            .block(Block::default().borders(Borders::ALL).title("Location"))
            .style(style),
        area,
    );
}

fn render_voter_cards(f: &mut Frame, area: Rect, state: &mut EditorState) {
    if state.form.voters.is_empty() {
        f.render_widget(
            Paragraph::new("Enter a voter count to add voter details")
                .block(Block::default().borders(Borders::ALL).title("Voter Details"))
                .style(Style::default().fg(Color::Gray)),
            area,
        );
        return;
    }

    let focused_voter = match state.focus {
        EditorFocus::Voter { index, .. } => Some(index),
        _ => None,
    };

    let items: Vec<ListItem> = state
        .form
        .voters
        .iter()
        .enumerate()
        .map(|(i, voter)| {
            let field_focus = |field: VoterField| {
                state.focus
                    == EditorFocus::Voter {
                        index: i,
                        field,
                    }
            };
            let style_for = |field: VoterField| {
                if field_focus(field) {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                }
            };

            let colour_text = match voter.colour_round {
                Some(c) => format!("◄ {} ►", c.label()),
                None => "◄ Select ►".to_string(),
            };
            ListItem::new(vec![
                Line::from(Span::styled(
                    format!("Voter {}", i + 1),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::raw("  Name: "),
                    Span::styled(
                        if field_focus(VoterField::Name) {
                            format!("{}▏", voter.name)
                        } else {
                            voter.name.clone()
                        },
                        style_for(VoterField::Name),
                    ),
                    Span::raw("  Age: "),
                    Span::styled(
                        if field_focus(VoterField::Age) {
                            format!("{}▏", voter.age)
                        } else {
                            voter.age.clone()
                        },
                        style_for(VoterField::Age),
                    ),
                    Span::raw("  Colour: "),
                    Span::styled(colour_text, style_for(VoterField::Colour)),
                ]),
            ])
        })
        .collect();

    state.voter_list.select(focused_voter);
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Voter Details"))
        .highlight_symbol("→ ");
    f.render_stateful_widget(list, area, &mut state.voter_list);
}

fn render_save_row(f: &mut Frame, area: Rect, state: &EditorState) {
    let focused = state.focus == EditorFocus::Save;
    let label = if state.saving {
        "Saving..."
    } else {
        "💾 Save Sheet (Enter)"
    };
    let style = if state.saving {
        Style::default().fg(Color::Gray)
    } else if focused {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    f.render_widget(
        Paragraph::new(label)
            .block(Block::default().borders(Borders::ALL))
            .style(style),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_order_walks_fields_voters_then_save() {
        let mut state = EditorState::new_sheet();
        state.form.set_no_of_voters("1");

        let mut seen = vec![state.focus];
        for _ in 0..8 {
            state.next_focus();
            seen.push(state.focus);
        }
        assert_eq!(
            seen,
            vec![
                EditorFocus::HouseName,
                EditorFocus::ColourRound,
                EditorFocus::Community,
                EditorFocus::NoOfVoters,
                EditorFocus::Location,
                EditorFocus::Voter {
                    index: 0,
                    field: VoterField::Name
                },
                EditorFocus::Voter {
                    index: 0,
                    field: VoterField::Age
                },
                EditorFocus::Voter {
                    index: 0,
                    field: VoterField::Colour
                },
                EditorFocus::Save,
            ]
        );
    }

    #[test]
    fn count_input_rederives_the_voter_list() {
        let mut state = EditorState::new_sheet();
        state.focus = EditorFocus::NoOfVoters;
        state.input('2');
        assert_eq!(state.form.voters.len(), 2);

        state.backspace();
        assert!(state.form.voters.is_empty());
        state.input('x');
        assert_eq!(state.form.no_of_voters, "");
    }

    #[test]
    fn colour_cycling_wraps_both_ways() {
        let mut state = EditorState::new_sheet();
        state.focus = EditorFocus::ColourRound;

        state.cycle_colour(1);
        assert_eq!(state.form.colour_round, Some(ColourRound::Saffron));
        state.cycle_colour(-1);
        assert_eq!(state.form.colour_round, Some(ColourRound::Darkpink));
    }
}
