use pomodoro::config;
use pomodoro::gui::app::AppModel;
use pomodoro::settings;
use pomodoro::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_default();
    let store = settings::open_store();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.pomodoro.Pomodoro");

    app.run::<AppModel>((config, store, rx));
}
