mod support;

use tpe_core::actor::{Actor, Role};
use tpe_core::competition::CompetitionType;
use tpe_core::county::CountyCode;
use tpe_core::region::RegionCode;
use tpe_core::season::SeasonYear;
use tpe_core::team::{TeamCategory, TeamStatus};
use tpe_core::Date;
use tpe_db::events::EventBus;
use rand::rngs::StdRng;
use rand::SeedableRng;

async fn admin_confirm_all(pool: &sqlx::SqlitePool, events: &EventBus, matches: &[tpe_core::fixture::Match]) {
    let admin = Actor {
        user_id: tpe_core::ids::UserId::new(1),
        role: Role::Admin,
        team_id: None,
    };
    for m in matches {
        tpe_db::result::submit_result(pool, m.id, &admin, 2, 0).await.unwrap();
        tpe_db::result::confirm_result(pool, events, m.id, admin.user_id, None, Date::mock())
            .await
            .unwrap();
    }
}

/// Seeds 7 regions with one county and 3 teams each, for a 21-team
/// champions-league-style roster.
async fn seed_seven_regions_of_three(pool: &sqlx::SqlitePool) -> Vec<tpe_core::ids::TeamId> {
    let mut team_ids = Vec::with_capacity(21);
    for r in 0..7 {
        let region = tpe_db::region::create(
            pool,
            &format!("Region {}", r),
            &RegionCode::try_new(format!("R{}", r)).unwrap(),
            Date::mock(),
        )
        .await
        .unwrap();
        let county = tpe_db::county::create(pool, &format!("County {}", r), CountyCode::from(r as i64), region.id, Date::mock())
            .await
            .unwrap();
        for t in 0..3 {
            let team = tpe_db::team::create(
                pool,
                &format!("R{}T{}", r, t),
                &county,
                TeamCategory::Men,
                TeamStatus::Active,
            )
            .await
            .unwrap();
            team_ids.push(team.id);
        }
    }
    team_ids
}

/// Regression test for the champions-league full-progression workflow
/// (group draw -> confirm all group matches -> knockout advancement ->
/// knockout bracket generation) all against the same competition/season:
/// the bracket generator must not choke on the already-persisted GROUP
/// fixtures.
#[tokio::test]
async fn cl_group_stage_then_knockout_bracket_generation() {
    let pool = support::pool().await;
    let events = EventBus::new();

    let season = tpe_db::lifecycle::create_season(&pool, "2025/26", SeasonYear::try_new(2025).unwrap(), Date::mock())
        .await
        .unwrap();
    let cl = tpe_db::lifecycle::create_competition(
        &pool,
        "Champions League",
        CompetitionType::National,
        TeamCategory::Men,
        season.id,
        None,
        None,
    )
    .await
    .unwrap();

    let team_ids = seed_seven_regions_of_three(&pool).await;
    tpe_db::lifecycle::add_teams(&pool, cl.id, &team_ids).await.unwrap();

    let mut rng = StdRng::seed_from_u64(99);
    let group_matches = tpe_db::scheduler::generate_group_draw(&pool, cl.id, season.id, Date::mock(), 7, &mut rng)
        .await
        .unwrap();
    assert_eq!(group_matches.len(), 42);

    admin_confirm_all(&pool, &events, &group_matches).await;

    let status = tpe_db::qualification::get_competition_status(&pool, cl.id, season.id).await.unwrap();
    assert!(status.complete);

    let field = tpe_db::qualification::advance_cl_knockout(&pool, cl.id, season.id).await.unwrap();
    assert_eq!(field.qualified.len(), 8);
    assert_eq!(field.pairs.len(), 4);
    let pairs: [(tpe_core::ids::TeamId, tpe_core::ids::TeamId); 4] = field.pairs.clone().try_into().unwrap();

    // Must succeed despite the 42 already-persisted GROUP matches sharing
    // this competition/season.
    let bracket_matches = tpe_db::scheduler::generate_cl_bracket(&pool, cl.id, season.id, pairs, Date::mock(), 14)
        .await
        .unwrap();
    assert_eq!(bracket_matches.len(), 1 + 4 + 8);

    // A repeat call is rejected: the quarter-final stage is already seeded.
    let err = tpe_db::scheduler::generate_cl_bracket(&pool, cl.id, season.id, pairs, Date::mock(), 14)
        .await
        .unwrap_err();
    assert!(matches!(err, tpe_db::DbError::Conflict(_)));
}

#[tokio::test]
async fn cup_draw_with_byes_matches_spec_scenario() {
    let pool = support::pool().await;
    let region = tpe_db::region::create(&pool, "Leinster", &RegionCode::try_new("LE").unwrap(), Date::mock())
        .await
        .unwrap();
    let county = tpe_db::county::create(&pool, "Dublin", CountyCode::from(1), region.id, Date::mock())
        .await
        .unwrap();
    let season = tpe_db::lifecycle::create_season(&pool, "2025/26", SeasonYear::try_new(2025).unwrap(), Date::mock())
        .await
        .unwrap();
    let cup = tpe_db::lifecycle::create_competition(
        &pool,
        "National Cup",
        CompetitionType::Cup,
        TeamCategory::Men,
        season.id,
        None,
        None,
    )
    .await
    .unwrap();

    let mut team_ids = Vec::with_capacity(48);
    for i in 0..48 {
        let team = tpe_db::team::create(&pool, &format!("Team {}", i), &county, TeamCategory::Men, TeamStatus::Active)
            .await
            .unwrap();
        team_ids.push(team.id);
    }
    tpe_db::lifecycle::add_teams(&pool, cup.id, &team_ids).await.unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    let matches = tpe_db::scheduler::generate_cup_draw(&pool, cup.id, season.id, Date::mock(), 7, &mut rng)
        .await
        .unwrap();
    // 48 teams -> bracket_size 64, 16 byes: 31 inner placeholders + 16 real R1 matches.
    assert_eq!(matches.len(), 47);

    let pre_filled_slots: usize = matches
        .iter()
        .filter(|m| m.bracket_position.map(|p| p < 32).unwrap_or(false))
        .map(|m| m.home_team_id.is_some() as usize + m.away_team_id.is_some() as usize)
        .sum();
    assert_eq!(pre_filled_slots, 16);

    let real_r1 = matches
        .iter()
        .filter(|m| matches!(m.stage, Some(tpe_core::fixture::Stage::Round1)) && m.home_team_id.is_some())
        .count();
    assert_eq!(real_r1, 16);

    // Generating a second bracket over the same competition/season is rejected.
    let err = tpe_db::scheduler::generate_cup_draw(&pool, cup.id, season.id, Date::mock(), 7, &mut rng)
        .await
        .unwrap_err();
    assert!(matches!(err, tpe_db::DbError::Conflict(_)));
}

/// Spec §8 scenario 6: seven REGIONAL competitions of 4 teams each, all
/// matches confirmed, qualify into the champions league with idempotent
/// repeat calls, then a group draw over the newly-qualified 21-team roster
/// succeeds.
#[tokio::test]
async fn qualification_is_idempotent_then_feeds_group_draw() {
    let pool = support::pool().await;
    let events = EventBus::new();

    let season = tpe_db::lifecycle::create_season(&pool, "2025/26", SeasonYear::try_new(2025).unwrap(), Date::mock())
        .await
        .unwrap();
    let cl = tpe_db::lifecycle::create_competition(
        &pool,
        "Champions League",
        CompetitionType::National,
        TeamCategory::Men,
        season.id,
        None,
        None,
    )
    .await
    .unwrap();

    for r in 0..7 {
        let region = tpe_db::region::create(
            &pool,
            &format!("Region {}", r),
            &RegionCode::try_new(format!("Q{}", r)).unwrap(),
            Date::mock(),
        )
        .await
        .unwrap();
        let county = tpe_db::county::create(&pool, &format!("County {}", r), CountyCode::from(r as i64), region.id, Date::mock())
            .await
            .unwrap();
        let regional = tpe_db::lifecycle::create_competition(
            &pool,
            &format!("Region {} League", r),
            CompetitionType::Regional,
            TeamCategory::Men,
            season.id,
            Some(region.id),
            None,
        )
        .await
        .unwrap();

        let mut team_ids = Vec::with_capacity(4);
        for t in 0..4 {
            let team = tpe_db::team::create(&pool, &format!("R{}T{}", r, t), &county, TeamCategory::Men, TeamStatus::Active)
                .await
                .unwrap();
            team_ids.push(team.id);
        }
        tpe_db::lifecycle::add_teams(&pool, regional.id, &team_ids).await.unwrap();

        let fixtures = tpe_db::scheduler::generate_round_robin(&pool, regional.id, season.id, Date::mock(), 7)
            .await
            .unwrap();
        admin_confirm_all(&pool, &events, &fixtures).await;
    }

    let first = tpe_db::qualification::qualify_for_champions_league(&pool, season.id, cl.id, 3)
        .await
        .unwrap();
    assert_eq!(first.qualified_count, 21);
    assert_eq!(first.added_count, 21);
    assert_eq!(first.source_count, 7);

    let second = tpe_db::qualification::qualify_for_champions_league(&pool, season.id, cl.id, 3)
        .await
        .unwrap();
    assert_eq!(second.qualified_count, 21);
    assert_eq!(second.added_count, 0);
    assert_eq!(second.already_present_count, 21);

    let mut rng = StdRng::seed_from_u64(5);
    let group_matches = tpe_db::scheduler::generate_group_draw(&pool, cl.id, season.id, Date::mock(), 7, &mut rng)
        .await
        .unwrap();
    assert_eq!(group_matches.len(), 42);
}
