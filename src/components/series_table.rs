use crate::models::series::SeriesPoint;
use crate::utils::format::{PLACEHOLDER, format_fixed};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SeriesTableProps {
    pub title: AttrValue,
    pub points: Vec<SeriesPoint>,
    #[prop_or(2)]
    pub decimals: usize,
    #[prop_or_default]
    pub unit: AttrValue,
}

/// Chart data as a two-column table, in the order given.
#[function_component(SeriesTable)]
pub fn series_table(props: &SeriesTableProps) -> Html {
    html! {
        <div class="series">
            <h3>{&props.title}</h3>
            <table>
                <tbody>
                    { for props.points.iter().map(|p| {
                        let mut value = format_fixed(p.value, props.decimals);
                        if value != PLACEHOLDER {
                            value.push_str(&props.unit);
                        }
                        html! {
                            <tr>
                                <td>{&p.name}</td>
                                <td class="num">{value}</td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        </div>
    }
}
