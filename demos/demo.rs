// Interactive demo: a decorated category list with keyboard, click and long-press folding.
use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use log::debug;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};
use simplelog::{Config, LevelFilter, WriteLogger};

use tui_expandablelist::{
    ExpandableList, ExpandableListStyle, ExpandableListView, ExpandableListViewState,
    ListDocument, ListEvent, Transition, markup,
};

const MARKUP: &str = r#"
<div id="catalog">
  <ul>
    <li class="expanded">Food
      <ul>
        <li class="expanded">Fruit
          <ul><li>Apple</li><li>Pear</li><li>Quince</li></ul>
        </li>
        <li>Vegetables
          <ul><li>Leek</li><li>Kale</li></ul>
        </li>
        <li>Nuts
          <ul>
            <li>Tree nuts<ul><li>Pecan</li><li>Walnut</li></ul></li>
            <li>Peanut</li>
          </ul>
        </li>
      </ul>
    </li>
    <li>Drinks
      <ul><li>Water</li><li>Tea<ul><li>Green</li><li>Black</li></ul></li></ul>
    </li>
    <li>Stones</li>
  </ul>
</div>"#;

struct App {
    doc: ListDocument,
    list: ExpandableList,
    state: ExpandableListViewState,
    status: String,
}

impl App {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let mut doc = markup::parse(MARKUP)?;
        let container = doc
            .children(doc.root())
            .first()
            .copied()
            .ok_or("markup has no container")?;
        let list = ExpandableList::attach(&mut doc, container, Default::default());
        doc.take_visibility_changes();
        let mut state = ExpandableListViewState::new();
        state.refresh(&list, &doc);
        state.focus_next(&list, &doc);
        Ok(Self {
            doc,
            list,
            state,
            status: "Tab: focus  Enter/arrows: fold  hold mouse: fold branch  q: quit".to_string(),
        })
    }

    fn report(&mut self, event: ListEvent) {
        // No animation here; the changes are only logged.
        for change in self.doc.take_visibility_changes() {
            debug!("{change:?}");
        }
        let what = match event {
            ListEvent::Handled(Transition::Expanded(item)) => {
                format!("expanded {}", self.doc.text_content(item))
            }
            ListEvent::Handled(Transition::Contracted(item)) => {
                format!("contracted {}", self.doc.text_content(item))
            }
            ListEvent::Handled(Transition::Cascade { root, count }) => {
                format!("branch {}: {count} items", self.doc.text_content(root))
            }
            ListEvent::FocusMoved(_) => return,
            ListEvent::Ignored(reason) => format!("ignored: {reason:?}"),
        };
        self.status = format!("{} {what}", Local::now().format("%H:%M:%S"));
    }
}

fn render(frame: &mut Frame, app: &mut App) {
    let [main, footer] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

    let style = ExpandableListStyle {
        title: Some(Line::from(" catalog ")),
        block_style: Style::default()
            .fg(Color::Rgb(221, 227, 235))
            .bg(Color::Rgb(24, 28, 36)),
        border_style: Style::default().fg(Color::Rgb(92, 110, 140)),
        icon_style: Style::default()
            .fg(Color::Rgb(229, 201, 133))
            .add_modifier(Modifier::BOLD),
        childless_style: Style::default().fg(Color::Rgb(86, 98, 120)),
        highlight_style: Style::default()
            .fg(Color::Rgb(255, 255, 255))
            .bg(Color::Rgb(52, 66, 96))
            .add_modifier(Modifier::BOLD),
        ..ExpandableListStyle::default()
    };
    let widget = ExpandableListView::new(&app.list, &app.doc, style);
    frame.render_stateful_widget(widget, main, &mut app.state);
    frame.render_widget(Paragraph::new(app.status.as_str()), footer);
}

fn run_app(mut terminal: DefaultTerminal, mut app: App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, &mut app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        return Ok(());
                    }
                    let event = app.state.handle_key(&app.list, &mut app.doc, key);
                    app.report(event);
                }
                Event::Mouse(mouse) => {
                    if let Some(event) =
                        app.state
                            .handle_mouse(&app.list, &mut app.doc, mouse, Instant::now())
                    {
                        app.report(event);
                    }
                }
                _ => {}
            }
        }

        if let Some(event) = app.state.tick(&app.list, &mut app.doc, Instant::now()) {
            app.report(event);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The terminal belongs to the UI, so logs go to a file.
    WriteLogger::init(
        LevelFilter::Debug,
        Config::default(),
        File::create("expandablelist-demo.log")?,
    )?;

    let app = App::new()?;
    let terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;
    let result = run_app(terminal, app);
    execute!(io::stdout(), DisableMouseCapture)?;
    ratatui::restore();
    Ok(result?)
}
