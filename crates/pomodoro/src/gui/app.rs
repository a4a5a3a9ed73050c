use crate::config::{self, Config};
use crate::events::{AppEvent, ControlCommand};
use crate::gui::picker;
use crate::gui::progress;
use crate::gui::theme::ThemeCss;
use crate::gui::{DIAL_SIZE, PROGRESS_SIZE};
use crate::settings::{self, SettingsStore};
use crate::theme::Theme;
use crate::timer::{DurationDraft, Durations, Session, TimerMode};
use dial::AngleTracker;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Timer,
}

impl Page {
    fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Timer => "timer",
        }
    }
}

pub struct AppModel {
    pub store: Box<dyn SettingsStore>,
    pub durations: Durations,
    pub session: Session,
    pub page: Page,
    pub draft: DurationDraft,
    pub theme: Rc<Cell<Theme>>,
    pub css: ThemeCss,
    pub tracker: Rc<RefCell<AngleTracker>>,
    pub progress: Rc<Cell<f64>>,
    pub root: gtk::ApplicationWindow,
    pub dial_area: gtk::DrawingArea,
    pub progress_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Control(ControlCommand),
    Tick,
    ConfigReload,
    Edit(TimerMode),
    DialChanged(u32),
    ConfirmDuration,
    CancelDuration,
    SelectTheme(u32),
    OpenTimer,
    OpenHome,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Control(cmd) => AppMsg::Control(cmd),
            AppEvent::Tick => AppMsg::Tick,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        Config,
        Box<dyn SettingsStore>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Pomodoro"),
            set_default_width: 420,
            set_default_height: 640,
            add_css_class: "pomodoro-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::space {
                        sender.input(AppMsg::Control(ControlCommand::Toggle));
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Stack {
                set_transition_type: gtk::StackTransitionType::SlideLeftRight,
                #[watch]
                set_visible_child_name: model.page.name(),

                add_named[Some("home")] = &gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 16,
                    set_margin_all: 24,

                    gtk::Label {
                        add_css_class: "pomodoro-mode",
                        #[watch]
                        set_label: model.draft.mode().title(),
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 8,
                        set_homogeneous: true,

                        gtk::Button {
                            add_css_class: "pomodoro-card",
                            #[watch]
                            set_label: &model.card_label(TimerMode::Focus),
                            #[watch]
                            set_class_active: ("selected", model.draft.mode() == TimerMode::Focus),
                            connect_clicked => AppMsg::Edit(TimerMode::Focus),
                        },
                        gtk::Button {
                            add_css_class: "pomodoro-card",
                            #[watch]
                            set_label: &model.card_label(TimerMode::ShortBreak),
                            #[watch]
                            set_class_active: ("selected", model.draft.mode() == TimerMode::ShortBreak),
                            connect_clicked => AppMsg::Edit(TimerMode::ShortBreak),
                        },
                        gtk::Button {
                            add_css_class: "pomodoro-card",
                            #[watch]
                            set_label: &model.card_label(TimerMode::LongBreak),
                            #[watch]
                            set_class_active: ("selected", model.draft.mode() == TimerMode::LongBreak),
                            connect_clicked => AppMsg::Edit(TimerMode::LongBreak),
                        },
                    },

                    gtk::Overlay {
                        #[name = "dial_area"]
                        gtk::DrawingArea {
                            set_content_width: DIAL_SIZE,
                            set_content_height: DIAL_SIZE,
                            set_hexpand: true,
                            set_vexpand: true,
                        },

                        add_overlay = &gtk::Label {
                            add_css_class: "pomodoro-minutes",
                            set_can_target: false,
                            #[watch]
                            set_label: &model.draft.shown(&model.durations).to_string(),
                        },
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 8,
                        set_halign: gtk::Align::Center,

                        gtk::Button {
                            set_label: "Cancel",
                            #[watch]
                            set_sensitive: model.draft.pending().is_some(),
                            connect_clicked => AppMsg::CancelDuration,
                        },
                        gtk::Button {
                            set_label: "Confirm",
                            add_css_class: "pomodoro-accent",
                            #[watch]
                            set_sensitive: model.draft.pending().is_some(),
                            connect_clicked => AppMsg::ConfirmDuration,
                        },
                    },

                    gtk::DropDown::from_strings(&theme_names) {
                        #[watch]
                        set_selected: model.theme.get().index(),
                        connect_selected_notify[sender] => move |dropdown| {
                            sender.input(AppMsg::SelectTheme(dropdown.selected()));
                        },
                    },

                    gtk::Button {
                        set_label: "Start",
                        add_css_class: "pomodoro-accent",
                        connect_clicked => AppMsg::OpenTimer,
                    },
                },

                add_named[Some("timer")] = &gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 16,
                    set_margin_all: 24,

                    gtk::Overlay {
                        #[name = "progress_area"]
                        gtk::DrawingArea {
                            set_content_width: PROGRESS_SIZE,
                            set_content_height: PROGRESS_SIZE,
                            set_hexpand: true,
                            set_vexpand: true,
                        },

                        add_overlay = &gtk::Box {
                            set_orientation: gtk::Orientation::Vertical,
                            set_halign: gtk::Align::Center,
                            set_valign: gtk::Align::Center,
                            set_can_target: false,

                            gtk::Label {
                                add_css_class: "pomodoro-time",
                                #[watch]
                                set_label: &model.time_text(),
                            },
                            gtk::Label {
                                add_css_class: "pomodoro-mode",
                                #[watch]
                                set_label: model.session.mode().label(),
                            },
                        },
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 8,
                        set_halign: gtk::Align::Center,

                        gtk::Button {
                            add_css_class: "pomodoro-accent",
                            #[watch]
                            set_label: if model.session.is_running() { "Pause" } else { "Start" },
                            connect_clicked => AppMsg::Control(ControlCommand::Toggle),
                        },
                        gtk::Button {
                            set_label: "Reset",
                            connect_clicked => AppMsg::Control(ControlCommand::Reset),
                        },
                        gtk::Button {
                            set_label: "Skip",
                            connect_clicked => AppMsg::Control(ControlCommand::Skip),
                        },
                        gtk::Button {
                            set_label: "Back",
                            connect_clicked => AppMsg::OpenHome,
                        },
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, store, rx) = init;

        let durations = settings::load_durations(&*store, config.durations);
        let theme = settings::load_theme(&*store, config.theme);
        let css = ThemeCss::install(theme);

        let draft = DurationDraft::new(TimerMode::Focus);
        let mode = draft.mode();
        let mut tracker = AngleTracker::new(mode.dial_max(), mode.to_dial(durations.get(mode)));
        tracker.set_hit_tolerance(config.hit_tolerance);

        let mut model = AppModel {
            store,
            durations,
            session: Session::new(durations, config.long_break_interval, config.auto_start),
            page: Page::Home,
            draft,
            theme: Rc::new(Cell::new(theme)),
            css,
            tracker: Rc::new(RefCell::new(tracker)),
            progress: Rc::new(Cell::new(0.0)),
            root: root.clone(),
            dial_area: gtk::DrawingArea::default(),
            progress_area: gtk::DrawingArea::default(),
        };

        let owned_names: Vec<String> = Theme::iter().map(|t| t.to_string()).collect();
        let theme_names: Vec<&str> = owned_names.iter().map(String::as_str).collect();

        let widgets = view_output!();

        model.dial_area = widgets.dial_area.clone();
        model.progress_area = widgets.progress_area.clone();

        {
            let sender = sender.clone();
            picker::attach(
                &model.dial_area,
                model.tracker.clone(),
                model.theme.clone(),
                move |value| sender.input(AppMsg::DialChanged(value)),
            );
        }
        progress::attach(
            &model.progress_area,
            model.progress.clone(),
            model.theme.clone(),
        );

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let now = Instant::now();
        match msg {
            AppMsg::Control(cmd) => self.control(cmd, now),
            AppMsg::Tick => {
                if let Some(change) = self.session.tick(now) {
                    log::info!(
                        "{} finished, next: {} ({} focus phases done)",
                        change.finished.label(),
                        change.next.label(),
                        change.completed_focus
                    );
                }
                self.refresh_progress(now);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.apply_config(&new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Edit(mode) => {
                self.draft.select(mode);
                self.tracker.borrow_mut().set_max(mode.dial_max());
                self.discard_draft();
            }
            AppMsg::DialChanged(value) => {
                self.draft.update(value);
            }
            AppMsg::ConfirmDuration => {
                let mode = self.draft.mode();
                if let Some(minutes) = self.draft.confirm(&mut self.durations) {
                    log::debug!("{} set to {} minutes", mode, minutes);
                    if let Err(e) = settings::save_duration(&mut *self.store, mode, minutes) {
                        log::error!("Failed to save {} duration: {}", mode, e);
                    }
                }
            }
            AppMsg::CancelDuration => self.discard_draft(),
            AppMsg::SelectTheme(idx) => {
                let theme = Theme::from_index(idx);
                if theme == self.theme.get() {
                    return;
                }
                self.apply_theme(theme);
                if let Err(e) = settings::save_theme(&mut *self.store, theme) {
                    log::error!("Failed to save theme: {}", e);
                }
            }
            AppMsg::OpenTimer => self.open_timer(now),
            AppMsg::OpenHome => {
                self.session.pause(now);
                self.page = Page::Home;
            }
        }
    }
}

impl AppModel {
    fn card_label(&self, mode: TimerMode) -> String {
        let name = match mode {
            TimerMode::Focus => "Pomodoro",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        };
        format!("{}\n{}", name, self.durations.get(mode))
    }

    fn time_text(&self) -> String {
        self.session.format_remaining(Instant::now())
    }

    fn control(&mut self, cmd: ControlCommand, now: Instant) {
        match cmd {
            ControlCommand::Show => self.root.present(),
            ControlCommand::Start if self.page == Page::Home => self.open_timer(now),
            ControlCommand::Start => self.session.start(now),
            ControlCommand::Pause => self.session.pause(now),
            ControlCommand::Toggle => self.session.toggle(now),
            ControlCommand::Reset => self.session.restart(now),
            ControlCommand::Skip => {
                let change = self.session.skip(now);
                log::info!(
                    "Skipped {}, next: {}",
                    change.finished.label(),
                    change.next.label()
                );
            }
        }
        self.refresh_progress(now);
    }

    fn open_timer(&mut self, now: Instant) {
        self.discard_draft();
        self.session.set_durations(self.durations);
        self.session.set_mode(TimerMode::Focus);
        self.session.start(now);
        self.page = Page::Timer;
        self.refresh_progress(now);
    }

    fn discard_draft(&mut self) {
        let value = self.draft.cancel(&self.durations);
        self.tracker.borrow_mut().set_value(value);
        self.dial_area.queue_draw();
    }

    fn refresh_progress(&self, now: Instant) {
        self.progress.set(self.session.elapsed_ratio(now));
        self.progress_area.queue_draw();
    }

    fn apply_theme(&self, theme: Theme) {
        self.theme.set(theme);
        self.css.apply(theme);
        self.dial_area.queue_draw();
        self.progress_area.queue_draw();
    }

    fn apply_config(&mut self, config: &Config) {
        self.session
            .set_cycle(config.long_break_interval, config.auto_start);
        self.tracker
            .borrow_mut()
            .set_hit_tolerance(config.hit_tolerance);

        self.durations = settings::load_durations(&*self.store, config.durations);
        if self.draft.pending().is_none() {
            self.discard_draft();
        }

        let theme = settings::load_theme(&*self.store, config.theme);
        if theme != self.theme.get() {
            self.apply_theme(theme);
        }
    }
}
