use paga::aggregate::{NodeMasks, Partition};
use paga::graph::DiGraph;
use paga::io::CsrData;
use paga::pipeline::{coarse_transitions, TransitionParams};
use rand::Rng;

fn main() {
    pretty_env_logger::init();

    let cells = 600;
    let groups = 6;
    let neighbor_count = 15;
    let mut rng = rand::thread_rng();

    // synthetic velocity graph: each cell points at random cells, biased
    // toward later groups so the abstraction has a direction to find
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    let mut weights = Vec::new();
    for u in 0..cells {
        for _ in 0..neighbor_count {
            let v = rng.gen_range(0..cells);
            let forward = v * groups / cells >= u * groups / cells;
            let strength: f64 = rng.gen_range(0.0..1.0) * if forward { 1.0 } else { 0.3 };
            if strength > 0.1 {
                rows.push(u);
                cols.push(v);
                weights.push(strength);
            }
        }
    }

    let graph = DiGraph::from_triplets(cells, &rows, &cols, &weights).unwrap();
    let membership: Vec<usize> = (0..cells).map(|u| u * groups / cells).collect();
    let labels = (0..groups).map(|g| format!("cluster_{g}")).collect();
    let partition = Partition::new(labels, membership).unwrap();

    let params = TransitionParams {
        neighbor_count,
        root_group: partition.index_of("cluster_0"),
    };
    let result =
        coarse_transitions(&graph, &partition, &NodeMasks::default(), &params).unwrap();

    println!("group sizes: {:?}", result.group_sizes);
    println!("spanning threshold: {:.6}", result.threshold);
    println!(
        "transitions_confidence: {}",
        serde_json::to_string_pretty(&CsrData::from(&result.transitions_confidence)).unwrap()
    );
}
