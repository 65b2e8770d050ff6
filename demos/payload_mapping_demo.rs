use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    inn_recon::demo_apps::run_payload_mapping_demo(std::env::args().skip(1))
}
