use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["tourmap"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_scrape_defaults() {
    let cli = Cli::try_parse_from(["tourmap", "scrape"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Scrape(ScrapeArgs {
            output: None,
            listing_url: None,
            delay_ms: None,
            skip_geocode: false,
            fresh: false,
        }))
    ));
}

#[test]
fn parses_scrape_overrides() {
    let cli = Cli::try_parse_from([
        "tourmap",
        "scrape",
        "--output",
        "out/tours.json",
        "--listing-url",
        "https://example.com/tours/",
        "--delay-ms",
        "0",
        "--skip-geocode",
        "--fresh",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Scrape(args)) = cli.command else {
        panic!("expected scrape command");
    };
    assert_eq!(args.output, Some(PathBuf::from("out/tours.json")));
    assert_eq!(args.listing_url.as_deref(), Some("https://example.com/tours/"));
    assert_eq!(args.delay_ms, Some(0));
    assert!(args.skip_geocode);
    assert!(args.fresh);
}

#[test]
fn rejects_non_numeric_delay() {
    assert!(Cli::try_parse_from(["tourmap", "scrape", "--delay-ms", "soon"]).is_err());
}

#[test]
fn parses_filter_with_repeated_countries() {
    let cli = Cli::try_parse_from([
        "tourmap",
        "filter",
        "--search",
        "park",
        "--country",
        "Canada",
        "--country",
        "United States",
        "--state",
        "WY",
        "--status",
        "completed",
        "--type",
        "Walking",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Filter(args)) = cli.command else {
        panic!("expected filter command");
    };
    assert_eq!(args.search, "park");
    assert_eq!(args.countries, ["Canada", "United States"]);
    assert_eq!(args.states, ["WY"]);
    assert_eq!(args.status, TourStatus::Completed);
    assert_eq!(args.tour_type.as_deref(), Some("Walking"));
    assert!(!args.facets);
}

#[test]
fn filter_status_defaults_to_all_and_rejects_unknown() {
    let cli = Cli::try_parse_from(["tourmap", "filter"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Filter(FilterArgs {
            status: TourStatus::All,
            ..
        }))
    ));

    assert!(Cli::try_parse_from(["tourmap", "filter", "--status", "someday"]).is_err());
}
