use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.slide-status {
    font-size: smaller;
    opacity: 0.7;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
