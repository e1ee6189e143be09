use pubquiz_lib::settings::Settings;

fn main() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pubquiz_lib::init_logging(&settings) {
        eprintln!("Logging disabled: {:#}", e);
    }

    if let Err(e) = pubquiz_lib::run(settings) {
        eprintln!("Error running application: {:#}", e);
        std::process::exit(1);
    }
}
