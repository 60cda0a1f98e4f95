use chrono::TimeZone;

fn main() {
    divan::main();
}

fn team_line(side: &str, id: i32, first_id: u64) -> String {
    let members: Vec<String> = (first_id..first_id + 5)
        .map(|steam_id| {
            format!(
                "{{\"steam_id\":{},\"name\":\"p{}\",\"alive\":{},\"money\":{},\"equipment_value\":{}}}",
                steam_id,
                steam_id,
                steam_id % 2 == 0,
                steam_id % 7 * 450,
                steam_id % 5 * 700
            )
        })
        .collect();

    format!(
        "\"{}\":{{\"id\":{},\"clan_name\":\"team{}\",\"members\":[{}]}}",
        side,
        id,
        id,
        members.join(",")
    )
}

/// Builds a trace with `rounds` rounds of 8 kills and a handful of utility each.
fn synthetic_trace(rounds: i32) -> Vec<u8> {
    let mut lines = vec![
        "{\"map_name\":\"de_dust2\",\"tick_rate\":64}".to_owned(),
        format!(
            "{{\"tick\":0,\"teams\":{{{},{}}}}}",
            team_line("ct", 3, 76561198000000100),
            team_line("t", 2, 76561198000000200)
        ),
    ];

    for round in 0..rounds {
        let base = round * 8000;
        lines.push(format!(
            "{{\"tick\":{},\"rounds_played\":{},\"event\":{{\"type\":\"round_start\"}}}}",
            base, round
        ));
        lines.push(format!(
            "{{\"tick\":{},\"event\":{{\"type\":\"freeze_time_end\"}}}}",
            base + 960
        ));
        for i in 0..3 {
            lines.push(format!(
                "{{\"tick\":{},\"event\":{{\"type\":\"smoke_start\"}}}}",
                base + 1500 + i * 40
            ));
            lines.push(format!(
                "{{\"tick\":{},\"event\":{{\"type\":\"explosive_detonation\"}}}}",
                base + 1700 + i * 40
            ));
            lines.push(format!(
                "{{\"tick\":{},\"event\":{{\"type\":\"player_damage\",\"weapon\":\"he_grenade\",\"health_damage\":{}}}}}",
                base + 1700 + i * 40,
                20 + i
            ));
        }
        for kill in 0..8 {
            lines.push(format!(
                "{{\"tick\":{},\"event\":{{\"type\":\"kill\"}}}}",
                base + 2500 + kill * 317
            ));
        }
        lines.push(format!(
            "{{\"tick\":{},\"event\":{{\"type\":\"round_end\",\"winner\":{}}}}}",
            base + 6000,
            2 + round % 2
        ));
        lines.push(format!(
            "{{\"tick\":{},\"event\":{{\"type\":\"round_end_official\"}}}}",
            base + 6448
        ));
    }

    lines.join("\n").into_bytes()
}

#[divan::bench(args = [12, 24, 30])]
fn process(bencher: divan::Bencher, rounds: i32) {
    let data = synthetic_trace(rounds);
    let observed_at = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    bencher.bench(|| {
        let mut store = analysis::store::MemoryStore::new();
        analysis::process(
            divan::black_box(&data),
            observed_at,
            analysis::AggregatorOptions::default(),
            &mut store,
        )
        .map(|summary| summary.rounds_stored)
    });
}
