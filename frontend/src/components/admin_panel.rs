use ip_logger_lib::{display::LogRow, session::LogsState};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AdminProps {
    pub logs: LogsState,
    pub on_sign_out: Callback<()>,
}

#[function_component]
pub fn AdminPanel(props: &AdminProps) -> Html {
    let on_sign_out = props.on_sign_out.clone();
    let onclick = Callback::from(move |_| on_sign_out.emit(()));

    let rows: Vec<LogRow> = props.logs.records().iter().map(LogRow::from).collect();

    html! {
        <div class="admin-panel">
            <div class="admin-header">
                <h1>{ "IP Logs Dashboard" }</h1>
                <button {onclick}>{ "Sign Out" }</button>
            </div>
            if props.logs == LogsState::Loading {
                <p class="note">{ "Loading logs..." }</p>
            } else if props.logs == LogsState::Failed {
                <p class="note">{ "Logs could not be loaded" }</p>
            }
            <table>
                <thead>
                    <tr>
                        <th>{ "IP Address" }</th>
                        <th>{ "Location" }</th>
                        <th>{ "Email" }</th>
                        <th>{ "Date" }</th>
                    </tr>
                </thead>
                <tbody>
                    { for rows.into_iter().map(|row| {
                        let key = row.key;
                        html! { <LogRowView {key} {row} /> }
                    }) }
                </tbody>
            </table>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct RowProps {
    row: LogRow,
}

#[function_component]
fn LogRowView(props: &RowProps) -> Html {
    let row = &props.row;
    html! {
        <tr>
            <td>{ row.ip.clone() }</td>
            <td>{ row.location.clone() }</td>
            <td>{ row.email.clone() }</td>
            <td>{ row.date.clone() }</td>
        </tr>
    }
}
