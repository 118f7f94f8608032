use chrono::Local;

fn main() {
    println!(
        "Petrel {} ({})",
        env!("CARGO_PKG_VERSION"),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    petrel::uci::run();
}
