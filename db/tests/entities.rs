mod support;

use tpe_core::county::CountyCode;
use tpe_core::region::RegionCode;
use tpe_core::season::SeasonYear;
use tpe_core::team::{TeamCategory, TeamStatus};
use tpe_core::Date;

#[tokio::test]
async fn region_county_team_round_trip() {
    let pool = support::pool().await;

    let region = tpe_db::region::create(&pool, "Leinster", &RegionCode::try_new("LE").unwrap(), Date::mock())
        .await
        .unwrap();
    let county = tpe_db::county::create(&pool, "Dublin", CountyCode::from(1), region.id, Date::mock())
        .await
        .unwrap();
    let team = tpe_db::team::create(&pool, "Rovers", &county, TeamCategory::Men, TeamStatus::Active)
        .await
        .unwrap();

    assert_eq!(team.county_id, county.id);
    assert_eq!(team.region_id, region.id);

    let fetched = tpe_db::team::get(&pool, team.id).await.unwrap();
    assert_eq!(fetched, team);

    let by_county = tpe_db::team::list_by_county(&pool, county.id).await.unwrap();
    assert_eq!(by_county.len(), 1);

    tpe_db::team::set_status(&pool, team.id, TeamStatus::Suspended).await.unwrap();
    let updated = tpe_db::team::get(&pool, team.id).await.unwrap();
    assert_eq!(updated.status, TeamStatus::Suspended);
}

#[tokio::test]
async fn delete_team_refuses_when_players_registered() {
    let pool = support::pool().await;
    let region = tpe_db::region::create(&pool, "Munster", &RegionCode::try_new("MU").unwrap(), Date::mock())
        .await
        .unwrap();
    let county = tpe_db::county::create(&pool, "Cork", CountyCode::from(2), region.id, Date::mock())
        .await
        .unwrap();
    let team = tpe_db::team::create(&pool, "City", &county, TeamCategory::Women, TeamStatus::Active)
        .await
        .unwrap();

    sqlx::query("INSERT INTO players (team_id, name) VALUES (?, ?)")
        .bind(team.id.get())
        .bind("Jane Doe")
        .execute(&pool)
        .await
        .unwrap();

    let err = tpe_db::lifecycle::delete_team(&pool, team.id).await.unwrap_err();
    assert_eq!(err.kind(), tpe_core::error::ErrorKind::InvariantConflict);

    sqlx::query("DELETE FROM players WHERE team_id = ?")
        .bind(team.id.get())
        .execute(&pool)
        .await
        .unwrap();
    assert!(tpe_db::lifecycle::delete_team(&pool, team.id).await.is_ok());
}

#[tokio::test]
async fn only_one_season_stays_active() {
    let pool = support::pool().await;

    let first = tpe_db::lifecycle::create_season(&pool, "2025/26", SeasonYear::try_new(2025).unwrap(), Date::mock())
        .await
        .unwrap();
    assert!(first.is_active);

    let second = tpe_db::lifecycle::create_season(&pool, "2026/27", SeasonYear::try_new(2026).unwrap(), Date::mock())
        .await
        .unwrap();
    assert!(second.is_active);

    let first_reloaded = tpe_db::season::get(&pool, first.id).await.unwrap();
    assert!(!first_reloaded.is_active);

    let active = tpe_db::season::active(&pool).await.unwrap().unwrap();
    assert_eq!(active.id, second.id);
}
