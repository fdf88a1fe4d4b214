use crate::config::{self, Config};
use crate::control::{Bounds, ControlAction, Point, SlideControl};
use crate::events::AppEvent;
use crate::gui::control;
use crate::gui::theme;
use gdk_pixbuf::Pixbuf;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

pub struct AppModel {
    pub control: Rc<RefCell<SlideControl>>,
    pub icon: Rc<RefCell<Option<Pixbuf>>>,
    pub confirmations: u32,
    pub config_path: Option<PathBuf>,
    pub size: (i32, i32),
    pub drawing_area: gtk::DrawingArea,
    ticking: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub enum AppMsg {
    PressBegin(Point),
    PressMove(Point),
    PressEnd(Option<Point>),
    Reset,
    Confirm,
    ValueChanged(u32),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Reset => AppMsg::Reset,
            AppEvent::Confirm => AppMsg::Confirm,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn status_text(&self) -> String {
        match self.confirmations {
            0 => "Not confirmed yet".to_string(),
            1 => "Confirmed".to_string(),
            n => format!("Confirmed {} times", n),
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(
            self.drawing_area.width() as f64,
            self.drawing_area.height() as f64,
        )
    }

    fn apply(&mut self, action: ControlAction, sender: &ComponentSender<Self>) {
        if action.value_changed > 0 {
            self.confirmations += action.value_changed;
        }
        if action.needs_frames {
            self.start_ticking(sender);
        }
        if action.should_redraw {
            self.drawing_area.queue_draw();
        }
    }

    /// Drives the control's settle animation from the frame clock until it
    /// stops asking for frames.
    fn start_ticking(&self, sender: &ComponentSender<Self>) {
        if self.ticking.replace(true) {
            return;
        }

        let control = self.control.clone();
        let ticking = self.ticking.clone();
        let sender = sender.clone();
        self.drawing_area.add_tick_callback(move |area, clock| {
            let now = Duration::from_micros(clock.frame_time().max(0) as u64);
            let action = control.borrow_mut().tick(now);

            if action.should_redraw {
                area.queue_draw();
            }
            if action.value_changed > 0 {
                sender.input(AppMsg::ValueChanged(action.value_changed));
            }

            if action.needs_frames {
                glib::ControlFlow::Continue
            } else {
                ticking.set(false);
                glib::ControlFlow::Break
            }
        });
    }

    fn apply_config(&mut self, config: &Config) -> ControlAction {
        *self.icon.borrow_mut() = config.icon.as_deref().and_then(control::load_icon);

        let mut control = self.control.borrow_mut();
        control.set_config(config.control_config());
        control.set_appearance(config.appearance())
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, Option<PathBuf>, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Slide to confirm"),
            set_resizable: true,

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                set_margin_all: 12,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_content_width: model.size.0,
                    set_content_height: model.size.1,
                    set_hexpand: true,

                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[sender] => move |_, x, y| {
                            sender.input(AppMsg::PressBegin(Point::new(x, y)));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::PressMove(Point::new(x + dx, y + dy)));
                            }
                        },
                        connect_drag_end[sender] => move |gesture, dx, dy| {
                            let point = gesture
                                .start_point()
                                .map(|(x, y)| Point::new(x + dx, y + dy));
                            sender.input(AppMsg::PressEnd(point));
                        },
                        connect_cancel[sender] => move |_, _| {
                            sender.input(AppMsg::PressEnd(None));
                        }
                    }
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 12,

                    gtk::Label {
                        #[watch]
                        set_label: &model.status_text(),
                        set_hexpand: true,
                        set_xalign: 0.0,
                        add_css_class: "slide-status",
                    },

                    gtk::Button {
                        set_label: "Reset",
                        connect_clicked => AppMsg::Reset,
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, config_path, rx) = init;

        theme::load_css();

        let model = AppModel {
            control: Rc::new(RefCell::new(SlideControl::new(
                config.control_config(),
                config.appearance(),
            ))),
            icon: Rc::new(RefCell::new(None)),
            confirmations: 0,
            config_path,
            size: (config.width, config.height),
            drawing_area: gtk::DrawingArea::default(),
            ticking: Rc::new(Cell::new(false)),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.apply_config(&config);

        let control_draw = model.control.clone();
        let icon_draw = model.icon.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                let bounds = Bounds::new(width as f64, height as f64);
                if let Err(e) = control::draw(
                    cr,
                    &control_draw.borrow(),
                    bounds,
                    icon_draw.borrow().as_ref(),
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        let bounds = self.bounds();
        let action = match msg {
            AppMsg::PressBegin(point) => self.control.borrow_mut().press_begin(point, bounds),
            AppMsg::PressMove(point) => self.control.borrow_mut().press_move(point, bounds),
            AppMsg::PressEnd(point) => self.control.borrow_mut().press_end(point, bounds),
            AppMsg::Reset => self.control.borrow_mut().reset(true),
            AppMsg::Confirm => self.control.borrow_mut().confirm(true),
            AppMsg::ValueChanged(count) => ControlAction::new(false, false, count),
            AppMsg::ConfigReload => {
                let new_config = config::load_or_default(self.config_path.as_deref());
                log::info!("Configuration reloaded");
                self.apply_config(&new_config)
            }
        };
        self.apply(action, &sender);
    }
}
