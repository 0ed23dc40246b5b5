#[cfg(test)]
mod tests {
    use crate::airspace::Airspace;
    use crate::commands::{parse, AtcCommand, ParseError};
    use crate::enums::FlightPhase;
    use crate::events::RadioCall;
    use crate::flightplan::{FlightPlan, RouteSegment};
    use crate::types::{normalize_heading, Position};

    // ---- Geometry ----

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = Position::new(100.0, 100.0);
        // Screen-up (negative y) is north.
        assert_eq!(origin.bearing_to(&Position::new(100.0, 0.0)), 0.0);
        assert_eq!(origin.bearing_to(&Position::new(200.0, 100.0)), 90.0);
        assert_eq!(origin.bearing_to(&Position::new(100.0, 200.0)), 180.0);
        assert_eq!(origin.bearing_to(&Position::new(0.0, 100.0)), 270.0);
    }

    #[test]
    fn test_bearing_diagonal() {
        let origin = Position::new(0.0, 0.0);
        let bearing = origin.bearing_to(&Position::new(10.0, -10.0));
        assert!((bearing - 45.0).abs() < 1e-9, "northeast should be 045, got {bearing}");
    }

    #[test]
    fn test_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_normalize_heading() {
        assert_eq!(normalize_heading(360.0), 0.0);
        assert_eq!(normalize_heading(-90.0), 270.0);
        assert_eq!(normalize_heading(725.0), 5.0);
        let h = normalize_heading(359.9);
        assert!((0.0..360.0).contains(&h));
    }

    // ---- Flight plan ----

    fn two_leg_plan() -> FlightPlan {
        FlightPlan::new(
            "RANDOM",
            "WAYPT3",
            "AAL100",
            vec![
                RouteSegment::Transit {
                    fix: "WAYPT1".to_owned(),
                    target_altitude_ft: 12_000.0,
                    target_speed_kt: 250.0,
                },
                RouteSegment::Transit {
                    fix: "WAYPT3".to_owned(),
                    target_altitude_ft: 10_000.0,
                    target_speed_kt: 230.0,
                },
            ],
        )
    }

    #[test]
    fn test_flight_plan_cursor_invariant() {
        let mut plan = two_leg_plan();
        assert_eq!(plan.cursor, 0);
        assert!(!plan.is_complete());
        assert_eq!(plan.current_segment().and_then(RouteSegment::fix), Some("WAYPT1"));

        plan.advance();
        assert_eq!(plan.cursor, 1);
        plan.advance();
        assert!(plan.is_complete());
        assert!(plan.current_segment().is_none());

        // Advancing an exhausted plan must not push the cursor past the route.
        plan.advance();
        plan.advance();
        assert_eq!(plan.cursor, plan.route.len());
    }

    #[test]
    fn test_flight_plan_complete() {
        let mut plan = two_leg_plan();
        plan.complete();
        assert!(plan.is_complete());
        assert_eq!(plan.cursor, 2);
    }

    // ---- Airspace ----

    #[test]
    fn test_default_airspace_registry() {
        let airspace = Airspace::default();
        assert_eq!(airspace.waypoints.len(), 4);
        assert_eq!(airspace.entry_fixes.len(), 4);
        assert_eq!(airspace.exit_fixes.len(), 4);
        assert!(airspace.waypoint("WAYPT1").is_some());
        assert!(airspace.waypoint("NOWHERE").is_none());

        let airport = airspace.airport("KBLR").expect("default airport");
        assert_eq!(airport.runways.len(), 2);
        // add_airport stamps the owning airport into each runway.
        let runway = airspace.find_runway("RWY27").expect("runway registered");
        assert_eq!(runway.airport_id, "KBLR");
        assert!(airspace.find_runway("RWY18").is_none());
    }

    // ---- Command grammar ----

    #[test]
    fn test_parse_heading() {
        let cmd = parse("aal100 heading 270").unwrap();
        assert_eq!(
            cmd,
            AtcCommand::Heading {
                callsign: "AAL100".to_owned(),
                heading_deg: 270.0,
            }
        );
        // Abbreviation.
        assert_eq!(parse("AAL100 H 5").unwrap(), AtcCommand::Heading {
            callsign: "AAL100".to_owned(),
            heading_deg: 5.0,
        });
    }

    #[test]
    fn test_parse_heading_range() {
        assert_eq!(
            parse("AAL100 HEADING 360"),
            Err(ParseError::InvalidHeading("360".to_owned()))
        );
        assert!(matches!(
            parse("AAL100 HEADING -5"),
            Err(ParseError::InvalidHeading(_))
        ));
    }

    #[test]
    fn test_parse_altitude_feet_and_flight_level() {
        assert_eq!(
            parse("SWA201 ALT 8000").unwrap(),
            AtcCommand::Altitude {
                callsign: "SWA201".to_owned(),
                altitude_ft: 8000.0,
            }
        );
        assert_eq!(
            parse("SWA201 A FL300").unwrap(),
            AtcCommand::Altitude {
                callsign: "SWA201".to_owned(),
                altitude_ft: 30_000.0,
            }
        );
        assert!(matches!(
            parse("SWA201 ALT -100"),
            Err(ParseError::InvalidAltitude(_))
        ));
        assert!(matches!(
            parse("SWA201 ALT FLXX"),
            Err(ParseError::InvalidAltitude(_))
        ));
    }

    #[test]
    fn test_parse_speed_direct_handoff_landing() {
        assert_eq!(
            parse("DAL9 SPD 250").unwrap(),
            AtcCommand::Speed {
                callsign: "DAL9".to_owned(),
                speed_kt: 250.0,
            }
        );
        assert_eq!(
            parse("DAL9 D waypt2").unwrap(),
            AtcCommand::DirectTo {
                callsign: "DAL9".to_owned(),
                fix: "WAYPT2".to_owned(),
            }
        );
        assert_eq!(
            parse("DAL9 HO").unwrap(),
            AtcCommand::ClearHandoff {
                callsign: "DAL9".to_owned(),
            }
        );
        assert_eq!(
            parse("DAL9 L rwy27").unwrap(),
            AtcCommand::ClearLanding {
                callsign: "DAL9".to_owned(),
                runway: "RWY27".to_owned(),
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert_eq!(parse("AAL100"), Err(ParseError::MissingVerb));
        assert_eq!(
            parse("AAL100 FLY 90"),
            Err(ParseError::UnknownVerb("FLY".to_owned()))
        );
        assert!(matches!(
            parse("AAL100 HEADING"),
            Err(ParseError::MissingValue(_))
        ));
        assert!(matches!(
            parse("AAL100 SPEED fast"),
            Err(ParseError::InvalidSpeed(_))
        ));
    }

    // ---- Serde ----

    #[test]
    fn test_flight_phase_serde() {
        let variants = vec![
            FlightPhase::Cruise,
            FlightPhase::Climb,
            FlightPhase::Descend,
            FlightPhase::Holding,
            FlightPhase::Approach,
            FlightPhase::Landed,
            FlightPhase::TakingOff,
            FlightPhase::ReadyForHandoff,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: FlightPhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_route_segment_serde() {
        let segments = vec![
            RouteSegment::Transit {
                fix: "WAYPT1".to_owned(),
                target_altitude_ft: 12_000.0,
                target_speed_kt: 250.0,
            },
            RouteSegment::Landing {
                airport_id: "KBLR".to_owned(),
                runway: "RWY09".to_owned(),
                target_altitude_ft: 2000.0,
                target_speed_kt: 225.0,
            },
        ];
        for seg in &segments {
            let json = serde_json::to_string(seg).unwrap();
            let back: RouteSegment = serde_json::from_str(&json).unwrap();
            assert_eq!(*seg, back);
        }
    }

    #[test]
    fn test_atc_command_serde() {
        let commands = vec![
            AtcCommand::Heading {
                callsign: "AAL100".to_owned(),
                heading_deg: 90.0,
            },
            AtcCommand::DirectTo {
                callsign: "AAL100".to_owned(),
                fix: "WAYPT2".to_owned(),
            },
            AtcCommand::ClearLanding {
                callsign: "AAL100".to_owned(),
                runway: "RWY09".to_owned(),
            },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: AtcCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(*cmd, back);
        }
    }

    #[test]
    fn test_radio_call_render() {
        assert_eq!(
            RadioCall::RequestHigher { flight_level: 240 }.render(),
            "Requesting higher to FL240"
        );
        assert_eq!(
            RadioCall::ApproachingFix { fix: "WAYPT2".to_owned() }.render(),
            "Approaching WAYPT2"
        );
        assert_eq!(
            RadioCall::Touchdown { runway: "RWY09".to_owned() }.render(),
            "Touch down, RWY09"
        );
    }
}
