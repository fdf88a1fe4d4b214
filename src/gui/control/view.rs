use crate::control::appearance::LABEL_COLOR;
use crate::control::{
    Appearance, Bounds, CONTENT_INSET, CORNER_RADIUS, ICON_SIZE, LABEL_FONT_SIZE, PanelLayout,
    SlideControl,
};
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;
use std::path::Path;

struct PanelRenderer<'a> {
    layout: PanelLayout,
    bounds: Bounds,
    appearance: &'a Appearance,
    icon: Option<&'a Pixbuf>,
}

impl<'a> PanelRenderer<'a> {
    fn new(
        layout: PanelLayout,
        bounds: Bounds,
        appearance: &'a Appearance,
        icon: Option<&'a Pixbuf>,
    ) -> Self {
        Self {
            layout,
            bounds,
            appearance,
            icon,
        }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        cr.save()?;
        self.clip_rounded(cr);
        self.draw_revealed(cr)?;
        self.draw_panel(cr)?;
        cr.restore()
    }

    fn clip_rounded(&self, cr: &Context) {
        let (w, h) = (self.bounds.width, self.bounds.height);
        let r = CORNER_RADIUS.min(w / 2.0).min(h / 2.0);

        cr.new_sub_path();
        cr.arc(w - r, r, r, -PI / 2.0, 0.0);
        cr.arc(w - r, h - r, r, 0.0, PI / 2.0);
        cr.arc(r, h - r, r, PI / 2.0, PI);
        cr.arc(r, r, r, PI, 3.0 * PI / 2.0);
        cr.close_path();
        cr.clip();
    }

    fn draw_revealed(&self, cr: &Context) -> Result<(), cairo::Error> {
        set_source(cr, self.appearance.revealed_color.to_srgba());
        cr.rectangle(0.0, 0.0, self.bounds.width, self.bounds.height);
        cr.fill()?;

        match self.icon {
            Some(pixbuf) => self.draw_icon(cr, pixbuf),
            None => Ok(()),
        }
    }

    fn draw_icon(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        let size = ICON_SIZE as f64;
        let scale = (size / pixbuf.width() as f64).min(size / pixbuf.height() as f64);
        let y = (self.bounds.height - size) / 2.0;

        cr.save()?;
        cr.translate(CONTENT_INSET, y);
        cr.scale(scale, scale);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_panel(&self, cr: &Context) -> Result<(), cairo::Error> {
        if self.layout.width <= 0.0 {
            return Ok(());
        }

        cr.save()?;
        cr.rectangle(
            self.layout.origin_x,
            0.0,
            self.layout.width,
            self.bounds.height,
        );
        cr.clip_preserve();
        set_source(cr, self.appearance.panel_color.to_srgba());
        cr.fill()?;

        self.draw_label(cr)?;
        cr.restore()
    }

    /// The label fades out with the panel's opacity while the panel itself
    /// stays solid.
    fn draw_label(&self, cr: &Context) -> Result<(), cairo::Error> {
        let (r, g, b, a) = LABEL_COLOR.to_srgba().into_components();
        cr.set_source_rgba(r, g, b, a * self.layout.opacity);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(LABEL_FONT_SIZE);

        let text = self.appearance.label.as_str();
        let ext = cr.text_extents(text)?;
        cr.move_to(
            self.layout.origin_x + CONTENT_INSET,
            self.bounds.height / 2.0 - (ext.y_bearing() + ext.height() / 2.0),
        );
        cr.show_text(text)
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn draw(
    cr: &Context,
    control: &SlideControl,
    bounds: Bounds,
    icon: Option<&Pixbuf>,
) -> Result<(), cairo::Error> {
    let layout = control.layout(bounds);
    PanelRenderer::new(layout, bounds, control.appearance(), icon).draw(cr)
}

pub fn load_icon(path: &Path) -> Option<Pixbuf> {
    if path.as_os_str().is_empty() {
        return None;
    }

    Pixbuf::from_file_at_scale(path, ICON_SIZE, ICON_SIZE, true)
        .inspect_err(|e| log::error!("Failed to load icon {}: {}", path.display(), e))
        .ok()
}
