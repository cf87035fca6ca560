fn main() -> anyhow::Result<()> {
    ansidraw::app::run()
}
