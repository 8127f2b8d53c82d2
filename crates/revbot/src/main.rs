//! revbot entrypoint

fn main() -> anyhow::Result<()> {
    revbot::initialize_command_line()
}
