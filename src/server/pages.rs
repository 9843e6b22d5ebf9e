//! Embedded HTML pages. Each page fetches its JSON endpoint and plots with Chart.js.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ML Showcase</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-900 text-gray-100 min-h-screen">
    <header class="bg-gray-800 border-b border-gray-700 px-6 py-4">
        <h1 class="text-xl font-bold">ML Showcase</h1>
        <p class="text-sm text-gray-400">Two classic machine-learning demos, fitted live on every request</p>
    </header>
    <main class="p-6 grid grid-cols-1 md:grid-cols-2 gap-6">
        <a href="/regression" class="block bg-gray-800 rounded-lg p-6 hover:bg-gray-700">
            <h2 class="text-lg font-semibold mb-2">Linear regression</h2>
            <p class="text-gray-400">Predict house prices from the average number of rooms. See the fitted line, R&sup2; and RMSE.</p>
        </a>
        <a href="/knn" class="block bg-gray-800 rounded-lg p-6 hover:bg-gray-700">
            <h2 class="text-lg font-semibold mb-2">k-nearest neighbors</h2>
            <p class="text-gray-400">Classify iris flowers from two measurements. Tune k and watch accuracy and the confusion matrix change.</p>
        </a>
    </main>
</body>
</html>
"#;

pub const REGRESSION_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Linear regression - ML Showcase</title>
    <script src="https://cdn.tailwindcss.com"></script>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
</head>
<body class="bg-gray-900 text-gray-100 min-h-screen">
    <header class="bg-gray-800 border-b border-gray-700 px-6 py-4 flex justify-between">
        <h1 class="text-xl font-bold">Linear regression: house prices</h1>
        <a href="/" class="text-blue-400">Home</a>
    </header>
    <main class="p-6 grid grid-cols-3 gap-6">
        <div class="col-span-2 bg-gray-800 rounded-lg p-4"><canvas id="chart"></canvas></div>
        <div class="space-y-4">
            <div class="bg-gray-800 rounded-lg p-4">
                <h2 class="font-semibold mb-2">Metrics</h2>
                <dl id="metrics" class="grid grid-cols-2 gap-1 text-sm"></dl>
            </div>
            <div class="bg-gray-800 rounded-lg p-4">
                <h2 class="font-semibold mb-2">Predict</h2>
                <input id="rooms" type="number" step="0.1" value="5" class="w-full bg-gray-700 rounded p-2 mb-2">
                <button id="predict" class="w-full bg-blue-600 rounded p-2">Predict price</button>
                <p id="prediction" class="mt-2 text-sm"></p>
            </div>
            <p id="error" class="text-red-400 text-sm"></p>
        </div>
    </main>
    <script>
    const points = (xs, ys) => xs.map((x, i) => ({ x, y: ys[i] }));
    const MIN_ROOMS = 1, MAX_ROOMS = 15;
    let chart = null;
    function showError(msg) { document.getElementById('error').textContent = msg; }

    async function load() {
        const res = await fetch('/api/regression/data');
        const body = await res.json();
        if (!body.success) { showError(body.error); return; }
        const d = body.data, desc = body.description;
        chart = new Chart(document.getElementById('chart'), {
            type: 'scatter',
            data: { datasets: [
                { label: 'Train', data: points(d.train.x, d.train.y), backgroundColor: 'rgba(54,162,235,0.6)' },
                { label: 'Test', data: points(d.test.x, d.test.y), backgroundColor: 'rgba(255,99,132,0.7)' },
                { label: 'Fitted line', type: 'line', data: points(d.regression_line.x, d.regression_line.y),
                  borderColor: 'rgba(75,192,192,1)', pointRadius: 0, fill: false },
                { label: 'Prediction', data: [], pointStyle: 'star', pointRadius: 12,
                  borderColor: 'rgba(255,206,86,1)', backgroundColor: 'rgba(255,206,86,1)' },
            ]},
            options: { scales: {
                x: { title: { display: true, text: `${desc.feature_name} (${desc.feature_unit})` } },
                y: { title: { display: true, text: `${desc.target_name} (${desc.target_unit})` } },
            }},
        });
        const m = body.metrics;
        document.getElementById('metrics').innerHTML = [
            ['R²', m.r2_score], ['MSE', m.mse], ['RMSE', m.rmse],
            ['Coefficient', m.coefficient], ['Intercept', m.intercept],
            ['Train / test', `${desc.train_size} / ${desc.test_size}`],
        ].map(([k, v]) => `<dt class="text-gray-400">${k}</dt><dd>${v}</dd>`).join('');
    }

    function addPredictionPoint(rooms, price) {
        if (!chart) return;
        const star = chart.data.datasets.find(ds => ds.label === 'Prediction');
        star.data = [{ x: rooms, y: price }];
        chart.update();
    }

    document.getElementById('predict').addEventListener('click', async () => {
        const rooms = parseFloat(document.getElementById('rooms').value);
        if (!Number.isFinite(rooms) || rooms < MIN_ROOMS || rooms > MAX_ROOMS) {
            showError(`Enter a number of rooms between ${MIN_ROOMS} and ${MAX_ROOMS}`);
            return;
        }
        showError('');
        const res = await fetch(`/api/regression/predict?rooms=${encodeURIComponent(rooms)}`);
        const body = await res.json();
        if (!body.success) { showError(body.error); return; }
        document.getElementById('prediction').textContent =
            `${body.prediction.price} ${body.prediction.unit}  (${body.formula.equation})`;
        addPredictionPoint(body.input.rooms, body.prediction.price);
    });

    load().catch(e => showError('Failed to load data: ' + e.message));
    </script>
</body>
</html>
"#;

pub const KNN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>k-NN - ML Showcase</title>
    <script src="https://cdn.tailwindcss.com"></script>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
</head>
<body class="bg-gray-900 text-gray-100 min-h-screen">
    <header class="bg-gray-800 border-b border-gray-700 px-6 py-4 flex justify-between">
        <h1 class="text-xl font-bold">k-nearest neighbors: iris flowers</h1>
        <a href="/" class="text-blue-400">Home</a>
    </header>
    <main class="p-6 grid grid-cols-3 gap-6">
        <div class="col-span-2 bg-gray-800 rounded-lg p-4"><canvas id="chart"></canvas></div>
        <div class="space-y-4">
            <div class="bg-gray-800 rounded-lg p-4">
                <label for="k" class="font-semibold">k = <span id="k-value">5</span></label>
                <input id="k" type="range" min="1" max="20" value="5" class="w-full">
            </div>
            <div class="bg-gray-800 rounded-lg p-4">
                <h2 class="font-semibold mb-2">Accuracy: <span id="accuracy"></span></h2>
                <table id="confusion" class="text-sm w-full text-center"></table>
            </div>
            <div class="bg-gray-800 rounded-lg p-4">
                <h2 class="font-semibold mb-2">Selected test point</h2>
                <p id="selected" class="text-sm text-gray-400">Click a triangle to compare its species with the prediction.</p>
            </div>
            <p id="error" class="text-red-400 text-sm"></p>
        </div>
    </main>
    <script>
    const colors = ['rgba(255,99,132,0.7)', 'rgba(54,162,235,0.7)', 'rgba(75,192,192,0.7)'];
    let chart = null;
    function showError(msg) { document.getElementById('error').textContent = msg; }

    async function load(k) {
        const res = await fetch(`/api/knn/data?k=${k}&feature_x=2&feature_y=3`);
        const body = await res.json();
        if (!body.success) { showError(body.error); return; }
        showError('');
        const d = body.data, names = body.target_names;
        const datasets = [];
        names.forEach((name, c) => {
            datasets.push({
                label: `${name} (train)`, backgroundColor: colors[c],
                data: d.train.x.map((x, i) => ({ x, y: d.train.y[i], c: d.train.labels[i] })).filter(p => p.c === c),
            });
            datasets.push({
                label: `${name} (test, predicted)`, backgroundColor: colors[c], pointStyle: 'triangle', pointRadius: 6,
                data: d.test.x.map((x, i) => ({ x, y: d.test.y[i], c: d.test.predictions[i], actual: d.test.labels[i] }))
                    .filter(p => p.c === c),
            });
        });
        if (chart) chart.destroy();
        chart = new Chart(document.getElementById('chart'), {
            type: 'scatter', data: { datasets },
            options: {
                onClick: (_, elements) => {
                    if (!elements.length) return;
                    const { datasetIndex, index } = elements[0];
                    const point = chart.data.datasets[datasetIndex].data[index];
                    if (point.actual !== undefined) showClassificationResult(point, names);
                },
                scales: {
                x: { title: { display: true, text: body.current_features.x } },
                y: { title: { display: true, text: body.current_features.y } },
            }},
        });
        document.getElementById('selected').textContent = 'Click a triangle to compare its species with the prediction.';
        document.getElementById('accuracy').textContent = (body.metrics.accuracy * 100).toFixed(2) + '%';
        const header = '<tr><th></th>' + names.map(n => `<th>${n}</th>`).join('') + '</tr>';
        const rows = body.metrics.confusion_matrix.map((row, i) =>
            `<tr><th class="text-left">${names[i]}</th>` + row.map(v => `<td>${v}</td>`).join('') + '</tr>');
        document.getElementById('confusion').innerHTML = header + rows.join('');
    }

    function showClassificationResult(point, names) {
        const actual = names[point.actual], predicted = names[point.c];
        const verdict = point.actual === point.c ? 'correct' : 'misclassified';
        document.getElementById('selected').textContent =
            `(${point.x}, ${point.y}) actual: ${actual}, predicted: ${predicted} (${verdict})`;
    }

    const slider = document.getElementById('k');
    slider.addEventListener('input', () => { document.getElementById('k-value').textContent = slider.value; });
    slider.addEventListener('change', () => load(slider.value).catch(e => showError(e.message)));
    load(5).catch(e => showError('Failed to load data: ' + e.message));
    </script>
</body>
</html>
"#;
