mod support;

use tpe_core::actor::{Actor, Role};
use tpe_core::competition::CompetitionType;
use tpe_core::county::CountyCode;
use tpe_core::fixture::MatchStatus;
use tpe_core::region::RegionCode;
use tpe_core::season::SeasonYear;
use tpe_core::team::{TeamCategory, TeamStatus};
use tpe_core::Date;
use tpe_db::events::EventBus;

async fn seed_region_and_county(pool: &sqlx::SqlitePool) -> (tpe_core::region::Region, tpe_core::county::County) {
    let region = tpe_db::region::create(pool, "Connacht", &RegionCode::try_new("CN").unwrap(), Date::mock())
        .await
        .unwrap();
    let county = tpe_db::county::create(pool, "Galway", CountyCode::from(3), region.id, Date::mock())
        .await
        .unwrap();
    (region, county)
}

#[tokio::test]
async fn round_robin_schedule_then_full_confirmation_completes_competition() {
    let pool = support::pool().await;
    let (region, county) = seed_region_and_county(&pool).await;
    let season = tpe_db::lifecycle::create_season(&pool, "2025/26", SeasonYear::try_new(2025).unwrap(), Date::mock())
        .await
        .unwrap();
    let competition = tpe_db::lifecycle::create_competition(
        &pool,
        "Connacht Senior League",
        CompetitionType::Regional,
        TeamCategory::Men,
        season.id,
        Some(region.id),
        None,
    )
    .await
    .unwrap();

    let mut team_ids = Vec::new();
    for name in ["Alpha", "Beta", "Gamma", "Delta"] {
        let team = tpe_db::team::create(&pool, name, &county, TeamCategory::Men, TeamStatus::Active)
            .await
            .unwrap();
        team_ids.push(team.id);
    }
    tpe_db::lifecycle::add_teams(&pool, competition.id, &team_ids).await.unwrap();

    let fixtures = tpe_db::scheduler::generate_round_robin(&pool, competition.id, season.id, Date::mock(), 7)
        .await
        .unwrap();
    // 4 teams, double round-robin: 2 * 4 * 3 / 2 = 12 matches.
    assert_eq!(fixtures.len(), 12);

    // Scheduling twice over the same competition/season is rejected.
    let err = tpe_db::scheduler::generate_round_robin(&pool, competition.id, season.id, Date::mock(), 7)
        .await
        .unwrap_err();
    assert!(matches!(err, tpe_db::DbError::Conflict(_)));

    let events = EventBus::new();
    let admin = Actor {
        user_id: tpe_core::ids::UserId::new(1),
        role: Role::Admin,
        team_id: None,
    };

    for fixture in &fixtures {
        tpe_db::result::submit_result(&pool, fixture.id, &admin, 2, 1).await.unwrap();
        tpe_db::result::confirm_result(&pool, &events, fixture.id, admin.user_id, None, Date::mock())
            .await
            .unwrap();
    }

    let status = tpe_db::qualification::get_competition_status(&pool, competition.id, season.id)
        .await
        .unwrap();
    assert!(status.complete);
    assert_eq!(status.confirmed, 12);

    let table = tpe_db::standings::ranked_table(&pool, competition.id, season.id).await.unwrap();
    assert_eq!(table.len(), 4);
    for row in &table {
        assert_eq!(row.played.0, 6);
        assert!(row.invariants_hold());
    }
}

#[tokio::test]
async fn coach_cannot_submit_for_another_teams_match() {
    let pool = support::pool().await;
    let (region, county) = seed_region_and_county(&pool).await;
    let season = tpe_db::lifecycle::create_season(&pool, "2025/26", SeasonYear::try_new(2025).unwrap(), Date::mock())
        .await
        .unwrap();
    let competition = tpe_db::lifecycle::create_competition(
        &pool,
        "Connacht Senior League",
        CompetitionType::Regional,
        TeamCategory::Men,
        season.id,
        Some(region.id),
        None,
    )
    .await
    .unwrap();

    let home = tpe_db::team::create(&pool, "Home FC", &county, TeamCategory::Men, TeamStatus::Active)
        .await
        .unwrap();
    let away = tpe_db::team::create(&pool, "Away FC", &county, TeamCategory::Men, TeamStatus::Active)
        .await
        .unwrap();
    let bystander = tpe_db::team::create(&pool, "Bystander FC", &county, TeamCategory::Men, TeamStatus::Active)
        .await
        .unwrap();
    tpe_db::lifecycle::add_teams(&pool, competition.id, &[home.id, away.id, bystander.id])
        .await
        .unwrap();

    let fixtures = tpe_db::scheduler::generate_round_robin(&pool, competition.id, season.id, Date::mock(), 7)
        .await
        .unwrap();
    let fixture = fixtures
        .iter()
        .find(|m| m.home_team_id == Some(home.id) && m.away_team_id == Some(away.id))
        .expect("home vs away fixture exists");

    let outsider_coach = Actor {
        user_id: tpe_core::ids::UserId::new(2),
        role: Role::Coach,
        team_id: Some(bystander.id),
    };
    let err = tpe_db::result::submit_result(&pool, fixture.id, &outsider_coach, 1, 0).await.unwrap_err();
    assert_eq!(err.kind(), tpe_core::error::ErrorKind::InvariantConflict);

    let home_coach = Actor {
        user_id: tpe_core::ids::UserId::new(3),
        role: Role::Coach,
        team_id: Some(home.id),
    };
    tpe_db::result::submit_result(&pool, fixture.id, &home_coach, 1, 0).await.unwrap();
    let reloaded = tpe_db::match_::get(&pool, fixture.id).await.unwrap();
    assert_eq!(reloaded.status, MatchStatus::Completed);
}
