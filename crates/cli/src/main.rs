use agrocoop_core::CooperativeInfo;

fn main() -> anyhow::Result<()> {
    agrocoop_observability::init();

    let cooperative = CooperativeInfo::from_env().shared();
    let stdout = std::io::stdout();
    agrocoop_cli::run(&mut stdout.lock(), &cooperative)
}
