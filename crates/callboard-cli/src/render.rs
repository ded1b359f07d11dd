//! Plain-text rendering of the dashboard snapshot.
//!
//! The engine hands over structured tables; this module lays them out as the
//! metric tiles and chart tables of the original dashboard, in text form.

use callboard_reports::DashboardSnapshot;
use std::fmt::Write;

/// Notice shown when no record matched the selection.
pub const NO_DATA_NOTICE: &str = "Nenhum dado encontrado com os filtros selecionados.";

/// Renders the snapshot as text: the metric tiles first, then the four
/// summary tables.
pub fn render_text(snapshot: &DashboardSnapshot) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "DASHBOARD DE ATENDIMENTOS");
    let _ = writeln!(output, "=========================");

    if snapshot.no_matching_rows {
        let _ = writeln!(output);
        let _ = writeln!(output, "{NO_DATA_NOTICE}");
        return output;
    }

    let metrics = &snapshot.metrics;
    let _ = writeln!(output);
    let _ = writeln!(output, "TOTAL DE CHAMADAS:    {}", metrics.total_calls);
    let _ = writeln!(output, "ATENDIDAS:            {}", metrics.total_answered);
    let _ = writeln!(output, "NÃO ATENDIDAS:        {}", metrics.total_unanswered);
    let _ = writeln!(output, "NÍVEL DE SERVIÇO(%):  {}%", metrics.service_level_pct);
    let _ = writeln!(output, "TEMPO EM ATENDIMENTO: {}", metrics.total_handling_time);

    let _ = writeln!(output);
    let _ = writeln!(output, "Chamadas Atendidas e Não Atendidas por Mês");
    let _ = writeln!(
        output,
        "{:<12} {:>10} {:>14} {:>8} {:>17}",
        "Mês", "Atendidas", "Não Atendidas", "Total", "Nível de Serviço"
    );
    for row in &snapshot.monthly {
        let _ = writeln!(
            output,
            "{:<12} {:>10} {:>14} {:>8} {:>17}",
            row.month.label(),
            row.answered,
            row.unanswered,
            row.total,
            row.service_level
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Chamadas Atendidas e Não Atendidas por Dia da Semana");
    let _ = writeln!(
        output,
        "{:<12} {:>10} {:>14}",
        "Dia", "Atendidas", "Não Atendidas"
    );
    for row in &snapshot.weekday {
        let _ = writeln!(
            output,
            "{:<12} {:>10} {:>14}",
            row.weekday.label(),
            row.answered,
            row.unanswered
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Chamadas Atendidas e Não Atendidas por Hora do Dia");
    let _ = writeln!(
        output,
        "{:<6} {:>10} {:>14}",
        "Hora", "Atendidas", "Não Atendidas"
    );
    for row in &snapshot.hourly {
        let _ = writeln!(
            output,
            "{:<6} {:>10} {:>14}",
            row.hour, row.answered, row.unanswered
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Quantidade de Chamadas por Duração de Atendimento");
    let _ = writeln!(
        output,
        "{:<20} {:>10} {:>12}",
        "Duração", "Quantidade", "Porcentagem"
    );
    for row in &snapshot.duration {
        let _ = writeln!(
            output,
            "{:<20} {:>10} {:>11.2}%",
            row.bucket.label(),
            row.count,
            row.percentage
        );
    }

    output
}
