fn main() -> anyhow::Result<()> {
    matteid_lib::run()
}
