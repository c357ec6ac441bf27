use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub points: usize,
    pub triangles: usize,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;";
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:60px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:180px; display:flex; flex-direction:column; gap:10px; font-size:14px; color:#c9d1d9;">
            <div style={row_style}>
                <span style={label_style}>{"Points"}</span>
                <span style={value_style}>{ props.points }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Triangles"}</span>
                <span style={value_style}>{ props.triangles }</span>
            </div>
        </div>
    }
}
